//! Error types for `cfgguard`
//!
//! Loading failures are grouped into four categories (missing file, parse,
//! validation, unexpected) so callers can branch on *why* a load failed
//! instead of scraping diagnostic text.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `cfgguard` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (unreadable file, broken output stream)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `cfgguard` commands.
#[derive(Debug, Error)]
pub enum CfgGuardError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more files failed `validate`
    #[error("{invalid} of {total} configuration files failed validation")]
    ValidationFailed {
        /// Number of files that failed
        invalid: usize,
        /// Number of files checked
        total: usize,
    },
}

impl CfgGuardError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ValidationFailed { .. } => ExitCode::CONFIG_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// The four failure categories a configuration load can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The path does not reference an existing regular file.
    MissingFile,
    /// The document is not syntactically valid YAML.
    Parse,
    /// The document parsed but violates the schema.
    Validation,
    /// Anything else: I/O failure mid-read, bad encoding, oversize input.
    Unexpected,
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Path does not exist or is not a regular file
    #[error("Configuration file not found at {}", .path.display())]
    MissingFile {
        /// Path that was checked
        path: PathBuf,
    },

    /// YAML parsing failed
    #[error("parse error in {}: {message}", .path.display())]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Document violates the schema; carries every issue found
    #[error("{} for {}\n{}", summarize(.errors), .path.display(), render_issues(.errors))]
    ValidationError {
        /// Path to the configuration file
        path: PathBuf,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// File exceeds the loader's size limit
    #[error("{} is {size} bytes, larger than the {limit} byte limit", .path.display())]
    TooLarge {
        /// Path to the configuration file
        path: PathBuf,
        /// Actual file size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// File exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Maps this error onto the failure taxonomy.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MissingFile { .. } => FailureKind::MissingFile,
            Self::ParseError { .. } => FailureKind::Parse,
            Self::ValidationError { .. } => FailureKind::Validation,
            Self::TooLarge { .. } | Self::Read { .. } => FailureKind::Unexpected,
        }
    }

    /// Returns the validation issues, if this is a validation failure.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::ValidationError { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationIssue]) -> String {
    match errors.len() {
        1 => "1 validation error".to_string(),
        n => format!("{n} validation errors"),
    }
}

fn render_issues(errors: &[ValidationIssue]) -> String {
    errors
        .iter()
        .map(|issue| format!("  {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found during configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path to the problematic field (e.g., "database.port")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        if self.path.is_empty() {
            write!(f, "{prefix}: {}", self.message)
        } else {
            write!(f, "{prefix}: {} at {}", self.message, self.path)
        }
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - validation failure that prevents configuration from being used
    Error,
    /// Warning - potential issue that does not prevent configuration loading
    Warning,
}

// ============================================================================
// Tests
// ============================================================================
