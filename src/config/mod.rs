//! Resource configuration: decoding, validation and loading
//!
//! The host hands over an untyped key→value map ([`ResourceConfig`]). It is
//! checked by [`ConfigValidator`] and decoded into a typed [`WafflesConfig`]
//! before anything is executed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCode;

pub mod home;
pub mod loader;
pub mod validator;
mod weak;

pub use home::expand_home;
pub use loader::{load_resource_config, ConfigFormat};
pub use validator::{ConfigValidator, OPTIONAL_FIELDS, REQUIRED_FIELDS};

/// Where waffles is installed when `waffles_exec` is not given.
pub const DEFAULT_WAFFLES_EXEC: &str = "/etc/waffles/waffles.sh";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("\"{0}\": required field is not set")]
    MissingRequired(String),

    #[error("invalid key: {0}")]
    UnknownField(String),

    #[error("failed to decode configuration: {0}")]
    Decode(String),

    #[error("cannot expand home directory in '{path}': {reason}")]
    HomeExpansion { path: String, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl ConfigError {
    pub fn code(&self) -> u16 {
        match self {
            Self::MissingRequired(_) => ErrorCode::VALIDATION_REQUIRED_FIELD,
            Self::UnknownField(_) => ErrorCode::VALIDATION_UNKNOWN_FIELD,
            Self::Decode(_) => ErrorCode::VALIDATION_INVALID_TYPE,
            Self::HomeExpansion { .. } => ErrorCode::CONFIG_PATH_ERROR,
            Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::CONFIG_NOT_FOUND
            }
            Self::Read { .. } => ErrorCode::CONFIG_GENERIC,
            Self::Parse { .. } => ErrorCode::CONFIG_PARSE_ERROR,
            Self::UnsupportedFormat(_) => ErrorCode::CONFIG_UNSUPPORTED_FORMAT,
        }
    }
}

/// Untyped configuration as supplied by the host.
///
/// `raw` holds the configuration as written; `config` holds values the host
/// has resolved or overridden and takes precedence on lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub raw: Map<String, Value>,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl ResourceConfig {
    pub fn new(raw: Map<String, Value>) -> Self {
        Self {
            raw,
            config: Map::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key).or_else(|| self.raw.get(key))
    }

    /// Set a resolved value, shadowing any raw value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.config.insert(key.into(), value.into());
    }

    /// Every key present in either map, sorted.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.raw
            .keys()
            .chain(self.config.keys())
            .map(String::as_str)
            .collect()
    }

    /// Raw values overlaid with resolved ones.
    pub fn merged(&self) -> Map<String, Value> {
        let mut merged = self.raw.clone();
        for (key, value) in &self.config {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}

impl From<Map<String, Value>> for ResourceConfig {
    fn from(raw: Map<String, Value>) -> Self {
        Self::new(raw)
    }
}

/// Typed waffles configuration.
///
/// Decoding is strict about keys and lenient about types: `"3"` is accepted
/// for a number and `"true"` or `1` for a flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WafflesConfig {
    #[serde(deserialize_with = "weak::bool")]
    pub debug: bool,
    #[serde(deserialize_with = "weak::string")]
    pub host: String,
    #[serde(deserialize_with = "weak::string")]
    pub private_key: String,
    #[serde(deserialize_with = "weak::string")]
    pub remote_dir: String,
    #[serde(deserialize_with = "weak::int")]
    pub retry: i64,
    #[serde(deserialize_with = "weak::string")]
    pub role: String,
    #[serde(deserialize_with = "weak::string")]
    pub site_directory: String,
    #[serde(deserialize_with = "weak::bool")]
    pub sudo: bool,
    #[serde(deserialize_with = "weak::string")]
    pub user: String,
    #[serde(deserialize_with = "weak::string")]
    pub waffles_exec: String,
    #[serde(deserialize_with = "weak::int")]
    pub wait: i64,
}

impl WafflesConfig {
    /// Decode the host configuration, fill defaults and expand `~` in paths.
    pub fn decode(config: &ResourceConfig) -> Result<Self, ConfigError> {
        let decoded: Self = serde_json::from_value(Value::Object(config.merged()))
            .map_err(|e| ConfigError::Decode(e.to_string()))?;
        decoded.with_defaults(DEFAULT_WAFFLES_EXEC)
    }

    /// Apply `default_exec` when no executable is set and expand home
    /// directories in `site_directory` and `private_key`.
    pub fn with_defaults(mut self, default_exec: &str) -> Result<Self, ConfigError> {
        if self.waffles_exec.is_empty() {
            self.waffles_exec = default_exec.to_string();
        }
        self.site_directory = expand_home(&self.site_directory)?;
        self.private_key = expand_home(&self.private_key)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: Value) -> ResourceConfig {
        match value {
            Value::Object(map) => ResourceConfig::new(map),
            _ => panic!("test config must be an object"),
        }
    }

    #[test]
    fn test_decode_minimal_fills_default_exec() {
        let config = resource(json!({
            "host": "www.example.com",
            "role": "test",
            "site_directory": "/srv/waffles",
        }));

        let decoded = WafflesConfig::decode(&config).unwrap();
        assert_eq!(decoded.host, "www.example.com");
        assert_eq!(decoded.role, "test");
        assert_eq!(decoded.site_directory, "/srv/waffles");
        assert_eq!(decoded.waffles_exec, DEFAULT_WAFFLES_EXEC);
        assert!(!decoded.debug);
        assert_eq!(decoded.retry, 0);
    }

    #[test]
    fn test_decode_weakly_typed_values() {
        let config = resource(json!({
            "host": "h",
            "role": "r",
            "site_directory": "/s",
            "debug": "true",
            "sudo": 1,
            "retry": "3",
            "wait": 10.0,
            "user": 42,
        }));

        let decoded = WafflesConfig::decode(&config).unwrap();
        assert!(decoded.debug);
        assert!(decoded.sudo);
        assert_eq!(decoded.retry, 3);
        assert_eq!(decoded.wait, 10);
        assert_eq!(decoded.user, "42");
    }

    #[test]
    fn test_decode_rejects_unknown_field() {
        let config = resource(json!({
            "host": "h",
            "role": "r",
            "site_directory": "/s",
            "colour": "blue",
        }));

        let err = WafflesConfig::decode(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Decode(ref msg) if msg.contains("colour")));
    }

    #[test]
    fn test_decode_rejects_unparseable_number() {
        let config = resource(json!({"retry": "lots"}));
        assert!(matches!(
            WafflesConfig::decode(&config),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn test_resolved_values_override_raw() {
        let mut config = resource(json!({"host": "raw-host", "role": "r"}));
        config.set("host", "resolved-host");

        assert_eq!(config.get("host"), Some(&json!("resolved-host")));
        assert_eq!(config.merged().get("host"), Some(&json!("resolved-host")));
        assert_eq!(config.keys().into_iter().collect::<Vec<_>>(), vec!["host", "role"]);
    }

    #[test]
    fn test_custom_exec_kept() {
        let config = WafflesConfig {
            waffles_exec: "/opt/waffles/waffles.sh".into(),
            ..Default::default()
        }
        .with_defaults(DEFAULT_WAFFLES_EXEC)
        .unwrap();
        assert_eq!(config.waffles_exec, "/opt/waffles/waffles.sh");
    }

    #[test]
    fn test_decode_expands_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = resource(json!({
            "site_directory": "~/waffles",
            "private_key": "~/.ssh/id_rsa",
        }));

        let decoded = WafflesConfig::decode(&config).unwrap();
        assert_eq!(decoded.site_directory, home.join("waffles").display().to_string());
        assert_eq!(decoded.private_key, home.join(".ssh/id_rsa").display().to_string());
    }
}
