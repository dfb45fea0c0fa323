//! Configuration module
//!
//! Loads a YAML configuration file, validates it against the application
//! schema and hands back a typed, immutable [`AppConfig`] whose secrets are
//! redacted unless explicitly revealed.

pub mod loader;
pub mod schema;
pub mod secret;
pub mod validation;

pub use loader::{
    ConfigLoader, DEFAULT_CONFIG_FILE, LoadResult, LoadWarning, LoaderOptions,
    default_config_path, load_and_validate_config, load_and_validate_config_with,
};
pub use schema::{AppConfig, DatabaseConfig, FeatureConfig};
pub use secret::{REDACTED, SecretText};
pub use validation::{ValidationResult, Validator};
