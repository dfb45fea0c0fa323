//! `cfgguard` - Schema-validated application configuration
//!
//! Loads a YAML configuration file, validates every field against a fixed
//! schema and exposes the result as an immutable, strongly-typed
//! [`AppConfig`](config::AppConfig). Secret fields render as a redaction
//! placeholder unless explicitly revealed.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cfgguard::config::ConfigLoader;
//!
//! let loaded = ConfigLoader::with_defaults().load(Path::new("config.yaml"))?;
//! println!("host: {}", loaded.config.database().host());
//! println!("api key: {}", loaded.config.api_key());
//! # Ok::<(), cfgguard::error::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;

pub use config::{AppConfig, ConfigLoader, SecretText, load_and_validate_config};
pub use error::{ConfigError, FailureKind};
