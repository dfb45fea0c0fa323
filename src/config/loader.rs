//! Configuration loader
//!
//! This module implements the configuration loading pipeline:
//! 1. File check (existing regular file, within the size limit)
//! 2. Read and strip a UTF-8 BOM
//! 3. YAML parsing into a generic document
//! 4. Schema validation into a typed [`AppConfig`]
//!
//! [`ConfigLoader::load`] reports failures as a structured [`ConfigError`].
//! [`load_and_validate_config`] wraps it for callers that only want the
//! configuration or nothing, printing progress and diagnostics on the way.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::config::schema::AppConfig;
use crate::config::validation::Validator;
use crate::error::{ConfigError, FailureKind};

/// Default configuration file name, resolved next to the executable.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum configuration file size in bytes.
    pub max_config_size: u64,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_config_size: 10 * 1024 * 1024,
        }
    }
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: AppConfig,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Stateless between calls: loading the same unchanged file twice yields
/// equal results.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is not an existing regular file
    /// - The file is larger than `max_config_size` or cannot be read as UTF-8
    /// - YAML parsing fails
    /// - Validation fails (every violation is reported)
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let raw_content = self.read(path)?;
        self.load_from_str(&raw_content, path)
    }

    /// Parses and validates an in-memory configuration document.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed YAML and a validation error
    /// listing every schema violation.
    #[allow(clippy::unused_self)] // options only constrain file reads today
    pub fn load_from_str(&self, source: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
        let document = Self::parse(source, origin)?;
        Self::validate(&document, origin)
    }

    /// Stage 1: check the path and read the whole file.
    fn read(&self, path: &Path) -> Result<String, ConfigError> {
        let metadata = std::fs::metadata(path)
            .ok()
            .filter(std::fs::Metadata::is_file)
            .ok_or_else(|| ConfigError::MissingFile {
                path: path.to_path_buf(),
            })?;

        if metadata.len() > self.options.max_config_size {
            return Err(ConfigError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.options.max_config_size,
            });
        }

        tracing::debug!(file = %path.display(), bytes = metadata.len(), "reading configuration");
        std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Stage 2: parse into a generic YAML document.
    ///
    /// `serde_yaml::Value` only holds plain data, so parsing never runs
    /// code or builds arbitrary objects from tags.
    fn parse(source: &str, origin: &Path) -> Result<Value, ConfigError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        if source.trim().is_empty() {
            return Ok(Value::Null);
        }

        let parse_error = |e: serde_yaml::Error| ConfigError::ParseError {
            path: origin.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        };
        let mut document: Value = serde_yaml::from_str(source).map_err(parse_error)?;
        // `<<: *anchor` merge keys are resolved before validation.
        document.apply_merge().map_err(parse_error)?;
        tracing::debug!(file = %origin.display(), "configuration parsed");
        Ok(document)
    }

    /// Stage 3: validate the document against the schema.
    fn validate(document: &Value, origin: &Path) -> Result<LoadResult, ConfigError> {
        let result = Validator::new().validate(document);

        let warnings = result
            .warnings
            .iter()
            .map(|issue| LoadWarning {
                message: issue.message.clone(),
                location: Some(issue.path.clone()),
            })
            .collect();

        if result.has_errors() {
            tracing::debug!(
                file = %origin.display(),
                errors = result.errors.len(),
                "configuration invalid"
            );
            return Err(ConfigError::ValidationError {
                path: origin.to_path_buf(),
                errors: result.errors,
            });
        }

        let config = result
            .into_config()
            .ok_or_else(|| ConfigError::ValidationError {
                path: origin.to_path_buf(),
                errors: Vec::new(),
            })?;

        tracing::info!(file = %origin.display(), "configuration valid");
        Ok(LoadResult { config, warnings })
    }
}

// ============================================================================
// Reporting Adapter
// ============================================================================

/// Loads and validates a configuration file, returning `None` on any failure.
///
/// Progress lines go to stdout and diagnostics to stderr. Every failure
/// category ends in `None` plus a human-readable message; nothing panics
/// or propagates.
#[must_use]
pub fn load_and_validate_config(path: &Path) -> Option<AppConfig> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    load_and_validate_config_with(path, &mut stdout.lock(), &mut stderr.lock())
}

/// [`load_and_validate_config`] with caller-supplied output streams.
///
/// Write failures on either stream are ignored; they never change the result.
pub fn load_and_validate_config_with(
    path: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Option<AppConfig> {
    let loader = ConfigLoader::with_defaults();

    if !path.is_file() {
        let missing = ConfigError::MissingFile {
            path: path.to_path_buf(),
        };
        report_failure(&missing, err);
        return None;
    }

    let _ = writeln!(out, "Loading configuration from: {}", path.display());
    let loaded = loader.read(path).and_then(|raw| {
        let document = ConfigLoader::parse(&raw, path)?;
        let _ = writeln!(out, "Configuration loaded, now validating...");
        ConfigLoader::validate(&document, path)
    });

    match loaded {
        Ok(loaded) => {
            for warning in &loaded.warnings {
                tracing::warn!(
                    location = warning.location.as_deref().unwrap_or("<unknown>"),
                    "{}",
                    warning.message
                );
            }
            let _ = writeln!(out, "Configuration is valid!");
            Some(loaded.config)
        }
        Err(e) => {
            report_failure(&e, err);
            None
        }
    }
}

/// Writes the category-specific diagnostic for a failed load.
fn report_failure(error: &ConfigError, err: &mut impl Write) {
    let _ = match error.kind() {
        FailureKind::MissingFile => writeln!(err, "Error: {error}"),
        FailureKind::Parse => {
            let message = match error {
                ConfigError::ParseError { message, .. } => message.as_str(),
                _ => "",
            };
            writeln!(err, "Error parsing YAML file: {message}")
        }
        FailureKind::Validation => writeln!(err, "Configuration validation error:\n{error}"),
        FailureKind::Unexpected => writeln!(err, "An unexpected error occurred: {error}"),
    };
}

/// Resolves [`DEFAULT_CONFIG_FILE`] in the directory holding the executable.
///
/// Falls back to the current directory when the executable path is unknown.
#[must_use]
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_CONFIG_FILE)
}

// ============================================================================
// Tests
// ============================================================================
