//! Configuration schema types
//!
//! The validated application configuration. Records are only ever built by
//! [`Validator`](crate::config::validation::Validator) after every field has
//! passed its checks; fields are private and exposed through read-only
//! accessors so an `AppConfig` in hand always satisfies the schema.

use std::num::NonZeroU64;

use serde::Serialize;

use crate::config::secret::SecretText;

// ============================================================================
// Field Names and Bounds
// ============================================================================

/// Keys accepted at the document root.
pub const APP_CONFIG_FIELDS: &[&str] = &["database", "api_key", "features"];

/// Keys accepted under `database`.
pub const DATABASE_FIELDS: &[&str] = &["host", "port", "user", "password"];

/// Keys accepted under `features`.
pub const FEATURE_FIELDS: &[&str] = &["enable_beta_feature", "enable_dark_mode", "max_users"];

/// Smallest accepted `database.port`.
pub const MIN_PORT: u16 = 1;

/// Largest accepted `database.port`.
pub const MAX_PORT: u16 = u16::MAX;

// ============================================================================
// Top-Level Configuration
// ============================================================================

/// Root configuration record.
///
/// Serializing an `AppConfig` renders secrets as the redaction placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub(crate) database: DatabaseConfig,
    pub(crate) api_key: SecretText,
    pub(crate) features: FeatureConfig,
}

impl AppConfig {
    /// Database connection settings.
    #[must_use]
    pub const fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// API key (redacted unless revealed).
    #[must_use]
    pub const fn api_key(&self) -> &SecretText {
        &self.api_key
    }

    /// Feature flags.
    #[must_use]
    pub const fn features(&self) -> &FeatureConfig {
        &self.features
    }
}

// ============================================================================
// Database
// ============================================================================

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) user: String,
    pub(crate) password: SecretText,
}

impl DatabaseConfig {
    /// Database host; never empty.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Database port in `MIN_PORT..=MAX_PORT`.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub const fn password(&self) -> &SecretText {
        &self.password
    }
}

// ============================================================================
// Features
// ============================================================================

/// Feature flags and limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureConfig {
    pub(crate) enable_beta_feature: bool,
    pub(crate) enable_dark_mode: bool,
    pub(crate) max_users: NonZeroU64,
}

impl FeatureConfig {
    #[must_use]
    pub const fn enable_beta_feature(&self) -> bool {
        self.enable_beta_feature
    }

    #[must_use]
    pub const fn enable_dark_mode(&self) -> bool {
        self.enable_dark_mode
    }

    /// Maximum number of users; always positive.
    #[must_use]
    pub const fn max_users(&self) -> u64 {
        self.max_users.get()
    }
}
