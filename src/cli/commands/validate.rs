//! Validate configuration files without using them.
//!
//! Every file is loaded through [`ConfigLoader::load`]; the result for each
//! one is printed as human text or as a single JSON report.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadWarning};
use crate::error::{CfgGuardError, ConfigError, FailureKind, Severity, ValidationIssue};

/// Validation outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Path as given on the command line.
    pub path: String,
    /// Whether the file passed validation.
    pub valid: bool,
    /// Failure category, when the file did not pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Errors that prevented loading.
    pub errors: Vec<ValidationIssue>,
    /// Informational issues.
    pub warnings: Vec<ValidationIssue>,
}

/// Counts across all validated files.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// Complete report for a `validate` run.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}

/// Validate configuration files.
///
/// # Errors
///
/// Returns a validation-failed error if any file is invalid, or a JSON/I/O
/// error if the report cannot be written.
pub fn run(args: &ValidateArgs) -> Result<(), CfgGuardError> {
    let loader = ConfigLoader::with_defaults();
    let files: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(&loader, path, args.strict))
        .collect();
    let report = build_report(files);

    match args.format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.summary.invalid > 0 {
        return Err(CfgGuardError::ValidationFailed {
            invalid: report.summary.invalid,
            total: report.summary.total,
        });
    }
    Ok(())
}

/// Loads one file and turns the outcome into a report entry.
///
/// In strict mode warnings are promoted to errors.
#[must_use]
pub fn check_file(loader: &ConfigLoader, path: &Path, strict: bool) -> FileReport {
    tracing::info!(file = %path.display(), "validating configuration");

    match loader.load(path) {
        Ok(loaded) => {
            let warnings: Vec<_> = loaded.warnings.iter().map(warning_issue).collect();
            if strict && !warnings.is_empty() {
                let errors = warnings
                    .into_iter()
                    .map(|issue| ValidationIssue {
                        severity: Severity::Error,
                        ..issue
                    })
                    .collect();
                return FileReport {
                    path: path.display().to_string(),
                    valid: false,
                    failure: Some(FailureKind::Validation),
                    errors,
                    warnings: Vec::new(),
                };
            }
            FileReport {
                path: path.display().to_string(),
                valid: true,
                failure: None,
                errors: Vec::new(),
                warnings,
            }
        }
        Err(e) => FileReport {
            path: path.display().to_string(),
            valid: false,
            failure: Some(e.kind()),
            errors: error_issues(&e),
            warnings: Vec::new(),
        },
    }
}

/// Aggregates per-file results into a report with summary counts.
#[must_use]
pub fn build_report(files: Vec<FileReport>) -> ValidationReport {
    let valid = files.iter().filter(|f| f.valid).count();
    let summary = Summary {
        total: files.len(),
        valid,
        invalid: files.len() - valid,
    };
    ValidationReport { files, summary }
}

fn warning_issue(warning: &LoadWarning) -> ValidationIssue {
    ValidationIssue {
        path: warning.location.clone().unwrap_or_default(),
        message: warning.message.clone(),
        severity: Severity::Warning,
    }
}

/// Validation failures keep their per-field issues; every other failure
/// becomes a single root-level issue carrying the error message.
fn error_issues(error: &ConfigError) -> Vec<ValidationIssue> {
    match error {
        ConfigError::ValidationError { errors, .. } => errors.clone(),
        other => vec![ValidationIssue {
            path: String::new(),
            message: other.to_string(),
            severity: Severity::Error,
        }],
    }
}

fn print_human(report: &ValidationReport) {
    for file in &report.files {
        for warning in &file.warnings {
            tracing::warn!(file = %file.path, location = %warning.path, "{}", warning.message);
        }
        if file.valid {
            println!("{}: valid", file.path);
        } else {
            eprintln!("{}: invalid", file.path);
            for issue in &file.errors {
                eprintln!("  {issue}");
            }
        }
    }
}
