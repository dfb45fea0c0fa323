//! Example consumer of a validated configuration.
//!
//! Loads the configuration through the `Option`-returning adapter and, on
//! success, prints a few fields. Secrets are printed once through their
//! default (redacted) form and once through the explicit reveal accessor.

use std::io::Write;

use crate::cli::args::ShowArgs;
use crate::config::{AppConfig, default_config_path, load_and_validate_config};
use crate::error::CfgGuardError;

/// Load the configuration and print its fields.
///
/// A configuration that fails to load is not an error here: the loader has
/// already written its diagnostics, so the summary block is simply skipped.
///
/// # Errors
///
/// Returns an I/O error if stdout cannot be written.
pub fn run(args: &ShowArgs) -> Result<(), CfgGuardError> {
    let path = args.config.clone().unwrap_or_else(default_config_path);
    tracing::debug!(file = %path.display(), "resolved configuration path");

    if let Some(config) = load_and_validate_config(&path) {
        write_summary(&config, &mut std::io::stdout().lock())?;
    }
    Ok(())
}

/// Writes the human-readable summary of a loaded configuration.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_summary(config: &AppConfig, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Accessing Validated Configuration ---")?;
    writeln!(out, "Database Host: {}", config.database().host())?;
    writeln!(out, "Max Users Feature: {}", config.features().max_users())?;
    writeln!(out, "API Key: {}", config.api_key())?;
    writeln!(out, "Revealed API Key: '{}'", config.api_key().reveal())?;

    if config.features().enable_beta_feature() {
        writeln!(out, "Beta feature is enabled.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, REDACTED};
    use std::path::Path;

    fn config(beta: bool) -> AppConfig {
        let yaml = format!(
            "database:\n  host: db.local\n  port: 5432\n  user: u\n  password: p\n\
             api_key: key-42\n\
             features:\n  enable_beta_feature: {beta}\n  enable_dark_mode: false\n  max_users: 7\n"
        );
        ConfigLoader::with_defaults()
            .load_from_str(&yaml, Path::new("test.yaml"))
            .unwrap()
            .config
    }

    fn summary(config: &AppConfig) -> String {
        let mut out = Vec::new();
        write_summary(config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn summary_shows_fields_and_redacts_key() {
        let text = summary(&config(true));
        assert!(text.contains("Database Host: db.local"));
        assert!(text.contains("Max Users Feature: 7"));
        assert!(text.contains(&format!("API Key: {REDACTED}\n")));
        assert!(text.contains("Revealed API Key: 'key-42'"));
        assert!(text.contains("Beta feature is enabled."));
    }

    #[test]
    fn summary_omits_beta_line_when_disabled() {
        let text = summary(&config(false));
        assert!(!text.contains("Beta feature"));
    }

    #[test]
    fn summary_never_prints_password() {
        let text = summary(&config(true));
        assert!(!text.contains("password"));
        assert_eq!(text.matches("key-42").count(), 1);
    }
}
