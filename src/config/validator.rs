use serde_json::Value;

use super::{ConfigError, ResourceConfig};

/// Keys that must be present and non-null.
pub const REQUIRED_FIELDS: &[&str] = &["host", "role", "site_directory"];

/// Keys that may be present.
pub const OPTIONAL_FIELDS: &[&str] = &[
    "debug",
    "private_key",
    "remote_dir",
    "retry",
    "sudo",
    "user",
    "wait",
    "waffles_exec",
];

/// Checks a [`ResourceConfig`] against a fixed set of required and optional
/// keys. Errors never stop the check early; every problem is reported.
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    required: &'static [&'static str],
    optional: &'static [&'static str],
}

impl ConfigValidator {
    pub fn new(required: &'static [&'static str], optional: &'static [&'static str]) -> Self {
        Self { required, optional }
    }

    /// Validator for the waffles resource schema.
    pub fn waffles() -> Self {
        Self::new(REQUIRED_FIELDS, OPTIONAL_FIELDS)
    }

    fn is_known(&self, key: &str) -> bool {
        self.required.contains(&key) || self.optional.contains(&key)
    }

    /// Returns `(warnings, errors)`.
    ///
    /// Missing required keys are reported in declaration order, followed by
    /// unknown keys in sorted order. No warnings are produced today.
    pub fn validate(&self, config: &ResourceConfig) -> (Vec<String>, Vec<ConfigError>) {
        let warnings = Vec::new();
        let mut errors = Vec::new();

        for field in self.required {
            match config.get(field) {
                None | Some(Value::Null) => {
                    errors.push(ConfigError::MissingRequired((*field).to_string()))
                }
                Some(_) => {}
            }
        }

        for key in config.keys() {
            if !self.is_known(key) {
                errors.push(ConfigError::UnknownField(key.to_string()));
            }
        }

        (warnings, errors)
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::waffles()
    }
}
