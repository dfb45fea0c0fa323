//! Configuration validation
//!
//! Walks a parsed YAML document and builds an [`AppConfig`] from it.
//! Validation collects ALL errors (doesn't stop at first) so a single run
//! reports every missing field, wrong type and out-of-range value.
//!
//! Unknown keys are ignored and reported as warnings.

use std::num::NonZeroU64;

use serde_yaml::{Mapping, Value};

use crate::config::schema::{
    APP_CONFIG_FIELDS, AppConfig, DATABASE_FIELDS, DatabaseConfig, FEATURE_FIELDS, FeatureConfig,
    MAX_PORT, MIN_PORT,
};
use crate::config::secret::SecretText;
use crate::error::{Severity, ValidationIssue};

/// Maximum edit distance for "did you mean" suggestions on unknown keys.
const SUGGESTION_DISTANCE: usize = 2;

// ============================================================================
// Public API
// ============================================================================

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (informational).
    pub warnings: Vec<ValidationIssue>,

    config: Option<AppConfig>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The validated configuration; `None` whenever there are errors.
    #[must_use]
    pub const fn config(&self) -> Option<&AppConfig> {
        self.config.as_ref()
    }

    /// Consumes the result, returning the validated configuration.
    #[must_use]
    pub fn into_config(self) -> Option<AppConfig> {
        self.config
    }
}

/// Schema validator for configuration documents.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a parsed document and returns the result.
    ///
    /// Every field is checked even after earlier failures. The returned
    /// result carries a configuration only when no errors were recorded.
    pub fn validate(&mut self, document: &Value) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        let config = self.app_config(document);

        let errors = std::mem::take(&mut self.errors);
        ValidationResult {
            config: if errors.is_empty() { config } else { None },
            errors,
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Records
    // ========================================================================

    fn app_config(&mut self, document: &Value) -> Option<AppConfig> {
        let map = self.mapping(document, "")?;
        self.check_unknown_keys(map, "", APP_CONFIG_FIELDS);

        let database = self
            .required(map, "", "database")
            .and_then(|v| self.database(v, "database"));
        let api_key = self
            .required(map, "", "api_key")
            .and_then(|v| self.secret(v, "api_key"));
        let features = self
            .required(map, "", "features")
            .and_then(|v| self.features(v, "features"));

        Some(AppConfig {
            database: database?,
            api_key: api_key?,
            features: features?,
        })
    }

    fn database(&mut self, value: &Value, path: &str) -> Option<DatabaseConfig> {
        let map = self.mapping(value, path)?;
        self.check_unknown_keys(map, path, DATABASE_FIELDS);

        let host = self
            .required(map, path, "host")
            .and_then(|v| self.host(v, &child(path, "host")));
        let port = self
            .required(map, path, "port")
            .and_then(|v| self.port(v, &child(path, "port")));
        let user = self
            .required(map, path, "user")
            .and_then(|v| self.string(v, &child(path, "user")));
        let password = self
            .required(map, path, "password")
            .and_then(|v| self.secret(v, &child(path, "password")));

        Some(DatabaseConfig {
            host: host?,
            port: port?,
            user: user?,
            password: password?,
        })
    }

    fn features(&mut self, value: &Value, path: &str) -> Option<FeatureConfig> {
        let map = self.mapping(value, path)?;
        self.check_unknown_keys(map, path, FEATURE_FIELDS);

        let enable_beta_feature = self
            .required(map, path, "enable_beta_feature")
            .and_then(|v| self.boolean(v, &child(path, "enable_beta_feature")));
        let enable_dark_mode = self
            .required(map, path, "enable_dark_mode")
            .and_then(|v| self.boolean(v, &child(path, "enable_dark_mode")));
        let max_users = self
            .required(map, path, "max_users")
            .and_then(|v| self.max_users(v, &child(path, "max_users")));

        Some(FeatureConfig {
            enable_beta_feature: enable_beta_feature?,
            enable_dark_mode: enable_dark_mode?,
            max_users: max_users?,
        })
    }

    // ========================================================================
    // Constrained Fields
    // ========================================================================

    fn host(&mut self, value: &Value, path: &str) -> Option<String> {
        let host = self.string(value, path)?;
        if host.is_empty() {
            self.add_error(path, "String should have at least 1 character");
            return None;
        }
        Some(host)
    }

    fn port(&mut self, value: &Value, path: &str) -> Option<u16> {
        let n = self.integer(value, path)?;
        match u16::try_from(n) {
            Ok(port) if port >= MIN_PORT => Some(port),
            _ => {
                self.add_error(
                    path,
                    &format!(
                        "Port must be in the range {MIN_PORT}-{MAX_PORT} (inclusive), got {n}"
                    ),
                );
                None
            }
        }
    }

    fn max_users(&mut self, value: &Value, path: &str) -> Option<NonZeroU64> {
        let n = self.integer(value, path)?;
        if n <= 0 {
            self.add_error(path, &format!("Input should be greater than 0, got {n}"));
            return None;
        }
        let max_users = u64::try_from(n).ok().and_then(NonZeroU64::new);
        if max_users.is_none() {
            self.add_error(
                path,
                &format!("Input should be at most {}, got {n}", u64::MAX),
            );
        }
        max_users
    }

    // ========================================================================
    // Primitive Coercions
    // ========================================================================

    fn mapping<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Mapping> {
        match value {
            Value::Mapping(map) => Some(map),
            other => {
                self.type_error(other, path, "a valid mapping");
                None
            }
        }
    }

    fn string(&mut self, value: &Value, path: &str) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.type_error(other, path, "a valid string");
                None
            }
        }
    }

    fn secret(&mut self, value: &Value, path: &str) -> Option<SecretText> {
        match value {
            Value::String(s) => Some(SecretText::new(s.as_str())),
            // The offending value is not echoed for secret fields.
            Value::Tagged(_) => {
                self.add_error(path, "Custom YAML tags are not supported");
                None
            }
            _ => {
                self.add_error(path, "Input should be a valid string");
                None
            }
        }
    }

    fn boolean(&mut self, value: &Value, path: &str) -> Option<bool> {
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => {
                let integral = n
                    .as_i64()
                    .map(i128::from)
                    .or_else(|| n.as_f64().and_then(float_to_integer));
                match integral {
                    Some(0) => Some(false),
                    Some(1) => Some(true),
                    _ => None,
                }
            }
            Value::String(s) => parse_bool_str(s),
            _ => None,
        };
        if parsed.is_none() {
            self.type_error(value, path, "a valid boolean");
        }
        parsed
    }

    /// Coerces a value to an integer.
    ///
    /// Accepts YAML integers, finite floats without a fractional part and strings
    /// holding a base-10 integer. Booleans are rejected.
    fn integer(&mut self, value: &Value, path: &str) -> Option<i128> {
        let parsed = match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(i128::from(u))
                } else {
                    n.as_f64().and_then(float_to_integer)
                }
            }
            Value::String(s) => s.trim().parse::<i128>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            match value {
                Value::String(_) => self.add_error(
                    path,
                    "Input should be a valid integer, unable to parse string as an integer",
                ),
                Value::Number(n) => self.add_error(path, number_rejection(n)),
                other => self.type_error(other, path, "a valid integer"),
            }
        }
        parsed
    }

    // ========================================================================
    // Structural Checks
    // ========================================================================

    /// Looks up a required key, recording an error when it is absent.
    fn required<'a>(&mut self, map: &'a Mapping, parent: &str, key: &str) -> Option<&'a Value> {
        let value = map.get(key);
        if value.is_none() {
            self.add_error(&child(parent, key), "Field required");
        }
        value
    }

    /// Warns about keys the schema does not know; they are otherwise ignored.
    fn check_unknown_keys(&mut self, map: &Mapping, parent: &str, known: &[&str]) {
        for key in map.keys() {
            match key.as_str() {
                Some(name) if known.contains(&name) => {}
                Some(name) => {
                    let message = suggest_field(name, known).map_or_else(
                        || format!("unknown field '{name}' ignored"),
                        |hint| format!("unknown field '{name}' ignored (did you mean '{hint}'?)"),
                    );
                    self.add_warning(&child(parent, name), &message);
                }
                None => self.add_warning(
                    parent,
                    &format!("non-string key {} ignored", describe(key)),
                ),
            }
        }
    }

    fn type_error(&mut self, value: &Value, path: &str, expected: &str) {
        if let Value::Tagged(tagged) = value {
            self.add_error(
                path,
                &format!("Custom YAML tags are not supported, found {}", tagged.tag),
            );
        } else {
            self.add_error(
                path,
                &format!("Input should be {expected}, got {}", describe(value)),
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Adds an error to the collection.
    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Joins a parent path and a key with a dot.
fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Short description of a YAML value's kind for diagnostics.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}

/// Converts a float with no fractional part into an integer.
#[allow(clippy::cast_possible_truncation)]
fn float_to_integer(f: f64) -> Option<i128> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38).then(|| f as i128)
}

/// Why a YAML number could not be taken as an integer.
fn number_rejection(n: &serde_yaml::Number) -> &'static str {
    match n.as_f64() {
        Some(f) if !f.is_finite() => "Input should be a valid integer, got a non-finite number",
        Some(f) if f.fract() == 0.0 => "Input should be a valid integer, got a number too large",
        _ => "Input should be a valid integer, got a number with a fractional part",
    }
}

fn parse_bool_str(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "t" | "y" | "1" => Some(true),
        "false" | "no" | "off" | "f" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Suggests the closest known field name for a typo.
fn suggest_field<'a>(input: &str, known: &[&'a str]) -> Option<&'a str> {
    known
        .iter()
        .map(|name| (*name, strsim::damerau_levenshtein(input, name)))
        .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r"
database:
  host: localhost
  port: 5432
  user: admin
  password: db-secret
api_key: sk-test-abc
features:
  enable_beta_feature: true
  enable_dark_mode: false
  max_users: 10
";

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn validate(yaml: &str) -> ValidationResult {
        Validator::new().validate(&parse(yaml))
    }

    fn with_port(port: &str) -> String {
        VALID.replace("port: 5432", &format!("port: {port}"))
    }

    fn with_max_users(max_users: &str) -> String {
        VALID.replace("max_users: 10", &format!("max_users: {max_users}"))
    }

    fn error_paths(result: &ValidationResult) -> Vec<&str> {
        result.errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_validate_valid_document() {
        let result = validate(VALID);
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());

        let config = result.into_config().unwrap();
        assert_eq!(config.database().host(), "localhost");
        assert_eq!(config.database().port(), 5432);
        assert_eq!(config.database().user(), "admin");
        assert_eq!(config.database().password().reveal(), "db-secret");
        assert_eq!(config.api_key().reveal(), "sk-test-abc");
        assert!(config.features().enable_beta_feature());
        assert!(!config.features().enable_dark_mode());
        assert_eq!(config.features().max_users(), 10);
    }

    #[test]
    fn test_validate_port_boundaries() {
        for port in ["1", "65535"] {
            let result = validate(&with_port(port));
            assert!(result.is_valid(), "port {port}: {:?}", result.errors);
        }
        for port in ["0", "65536", "-1", "70000", "99999999999999999999"] {
            let result = validate(&with_port(port));
            assert!(result.has_errors(), "port {port} should be rejected");
            assert_eq!(error_paths(&result), ["database.port"]);
            assert!(result.config().is_none());
        }
    }

    #[test]
    fn test_port_error_mentions_range() {
        let result = validate(&with_port("70000"));
        let message = &result.errors[0].message;
        assert!(message.contains("1-65535"), "{message}");
        assert!(message.contains("70000"), "{message}");
    }

    #[test]
    fn test_validate_max_users_boundaries() {
        assert!(validate(&with_max_users("1")).is_valid());
        for value in ["0", "-5"] {
            let result = validate(&with_max_users(value));
            assert_eq!(error_paths(&result), ["features.max_users"]);
            assert!(result.errors[0].message.contains("greater than 0"));
        }
    }

    #[test]
    fn test_max_users_above_u64_rejected() {
        let result = validate(&with_max_users("18446744073709551616"));
        assert_eq!(error_paths(&result), ["features.max_users"]);
    }

    #[test]
    fn test_integer_coercions() {
        assert_eq!(
            validate(&with_port("\"8080\"")).config().map(|c| c.database().port()),
            Some(8080)
        );
        assert_eq!(
            validate(&with_port("\" 8080 \"")).config().map(|c| c.database().port()),
            Some(8080)
        );
        assert_eq!(
            validate(&with_port("8080.0")).config().map(|c| c.database().port()),
            Some(8080)
        );
    }

    #[test]
    fn test_integer_rejections() {
        for port in ["8080.5", "true", "abc", "null", "[1]", "{a: 1}", "\"\""] {
            let result = validate(&with_port(port));
            assert_eq!(
                error_paths(&result),
                ["database.port"],
                "port {port} should be a type error"
            );
            assert!(
                result.errors[0].message.contains("valid integer"),
                "{}",
                result.errors[0].message
            );
        }
    }

    #[test]
    fn test_integer_rejection_messages() {
        for (port, detail) in [
            ("8080.5", "got a number with a fractional part"),
            (".nan", "got a non-finite number"),
            (".inf", "got a non-finite number"),
            ("-.inf", "got a non-finite number"),
            ("1.0e40", "got a number too large"),
        ] {
            let result = validate(&with_port(port));
            assert_eq!(error_paths(&result), ["database.port"], "{port}");
            assert_eq!(
                result.errors[0].message,
                format!("Input should be a valid integer, {detail}"),
                "{port}"
            );
        }
    }

    #[test]
    fn test_boolean_coercions() {
        for (raw, expected) in [
            ("true", true),
            ("false", false),
            ("\"yes\"", true),
            ("\"Off\"", false),
            ("1", true),
            ("0", false),
            ("1.0", true),
            ("0.0", false),
        ] {
            let yaml = VALID.replace(
                "enable_beta_feature: true",
                &format!("enable_beta_feature: {raw}"),
            );
            let config = validate(&yaml).into_config();
            assert_eq!(
                config.map(|c| c.features().enable_beta_feature()),
                Some(expected),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_boolean_rejections() {
        for raw in ["2", "\"maybe\"", "null", "1.5", "2.0", ".nan"] {
            let yaml = VALID.replace(
                "enable_dark_mode: false",
                &format!("enable_dark_mode: {raw}"),
            );
            let result = validate(&yaml);
            assert_eq!(error_paths(&result), ["features.enable_dark_mode"], "{raw}");
            assert!(result.errors[0].message.contains("valid boolean"));
        }
    }

    #[test]
    fn test_string_fields_reject_non_strings() {
        let yaml = VALID.replace("user: admin", "user: 42");
        let result = validate(&yaml);
        assert_eq!(error_paths(&result), ["database.user"]);
        assert!(result.errors[0].message.contains("valid string"));
    }

    #[test]
    fn test_empty_host_rejected() {
        let yaml = VALID.replace("host: localhost", "host: \"\"");
        let result = validate(&yaml);
        assert_eq!(error_paths(&result), ["database.host"]);
        assert!(result.errors[0].message.contains("at least 1 character"));
    }

    #[test]
    fn test_secret_type_error_does_not_echo_value() {
        let yaml = VALID.replace("api_key: sk-test-abc", "api_key: 123456789");
        let result = validate(&yaml);
        assert_eq!(error_paths(&result), ["api_key"]);
        assert!(!result.errors[0].message.contains("123456789"));
    }

    #[test]
    fn test_missing_section_reported() {
        let yaml = VALID
            .lines()
            .take_while(|line| !line.starts_with("features"))
            .collect::<Vec<_>>()
            .join("\n");
        let result = validate(&yaml);
        assert_eq!(error_paths(&result), ["features"]);
        assert_eq!(result.errors[0].message, "Field required");
    }

    #[test]
    fn test_all_errors_collected() {
        let yaml = r"
database:
  host: ''
  port: 70000
  password: 5
api_key: key
features:
  enable_beta_feature: sometimes
  max_users: 0
";
        let result = validate(yaml);
        let paths = error_paths(&result);
        for expected in [
            "database.host",
            "database.port",
            "database.user",
            "database.password",
            "features.enable_beta_feature",
            "features.enable_dark_mode",
            "features.max_users",
        ] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
        assert_eq!(result.errors.len(), 7);
        assert!(result.config().is_none());
    }

    #[test]
    fn test_non_mapping_root() {
        for doc in ["null", "- a\n- b", "just a string", "42"] {
            let result = validate(doc);
            assert_eq!(error_paths(&result), [""], "{doc}");
            assert!(result.errors[0].message.contains("valid mapping"));
        }
    }

    #[test]
    fn test_non_mapping_section() {
        let yaml = "database: localhost\napi_key: k\nfeatures: []\n";
        let result = validate(yaml);
        assert_eq!(error_paths(&result), ["database", "features"]);
    }

    #[test]
    fn test_null_value_is_type_error_not_missing() {
        let yaml = VALID.replace("port: 5432", "port:");
        let result = validate(&yaml);
        assert_eq!(error_paths(&result), ["database.port"]);
        assert!(result.errors[0].message.contains("got null"));
    }

    #[test]
    fn test_tagged_values_rejected() {
        let yaml = VALID.replace("port: 5432", "port: !custom 5432");
        let result = validate(&yaml);
        assert_eq!(error_paths(&result), ["database.port"]);
        assert!(result.errors[0].message.contains("tags are not supported"));
    }

    #[test]
    fn test_unknown_keys_warn_but_pass() {
        let yaml = format!("{VALID}extra: 1\n").replace("port: 5432", "port: 5432\n  prot: 1");
        let result = validate(&yaml);
        assert!(result.is_valid(), "{:?}", result.errors);

        let warning_paths: Vec<_> = result.warnings.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(warning_paths, ["extra", "database.prot"]);
        assert!(result.warnings[1].message.contains("did you mean 'port'?"));
        assert!(
            result
                .warnings
                .iter()
                .all(|w| w.severity == Severity::Warning)
        );
    }

    #[test]
    fn test_misspelled_required_key_gets_hint() {
        let yaml = VALID.replace("api_key:", "api_kye:");
        let result = validate(&yaml);
        assert_eq!(error_paths(&result), ["api_key"]);
        assert!(result.warnings[0].message.contains("did you mean 'api_key'?"));
    }

    #[test]
    fn test_validator_is_reusable() {
        let mut validator = Validator::new();
        let bad = validator.validate(&parse(&with_port("0")));
        assert!(bad.has_errors());
        let good = validator.validate(&parse(VALID));
        assert!(good.is_valid());
        assert!(good.warnings.is_empty());
    }

    #[test]
    fn test_suggest_field() {
        assert_eq!(suggest_field("hots", DATABASE_FIELDS), Some("host"));
        assert_eq!(suggest_field("completely_unrelated", DATABASE_FIELDS), None);
    }
}
