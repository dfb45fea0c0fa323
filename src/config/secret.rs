//! Redacted secret strings.
//!
//! `SecretText` hides its value from every implicit formatting path
//! (`Display`, `Debug`, `Serialize`). The raw value is reachable only
//! through [`SecretText::reveal`].

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

/// Placeholder rendered in place of a secret value.
pub const REDACTED: &str = "**********";

/// A string whose contents never appear in formatted or serialized output.
///
/// The backing buffer is zeroized on drop.
pub struct SecretText(SecretString);

impl SecretText {
    /// Wraps a raw secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Returns the raw secret value.
    #[must_use]
    pub fn reveal(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretText {
    fn clone(&self) -> Self {
        Self::new(self.reveal())
    }
}

impl PartialEq for SecretText {
    fn eq(&self, other: &Self) -> bool {
        self.reveal() == other.reveal()
    }
}

impl Eq for SecretText {}

impl std::fmt::Display for SecretText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl std::fmt::Debug for SecretText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretText({REDACTED:?})")
    }
}

impl Serialize for SecretText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}
