use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

use super::{ConfigError, ResourceConfig};

/// On-disk formats a resource configuration can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Toml => {
                let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
                serde_json::to_value(table).map_err(|e| e.to_string())
            }
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Read a file holding the flat key→value map of a waffles resource.
///
/// The format is picked from the file extension. The top level must be a
/// map; an empty YAML document is treated as an empty map.
pub async fn load_resource_config(path: &Path) -> Result<ResourceConfig, ConfigError> {
    let format =
        ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.into()))?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.into(),
            source,
        })?;

    let parsed = format.parse(&content).map_err(|message| ConfigError::Parse {
        path: path.into(),
        message,
    })?;

    let raw = match parsed {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ConfigError::Parse {
                path: path.into(),
                message: format!("expected a map at the top level, found {other}"),
            })
        }
    };

    tracing::debug!("Loaded {} configuration keys from {}", raw.len(), path.display());
    Ok(ResourceConfig::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std_fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "waffles.toml",
            "host = \"www.example.com\"\nrole = \"test\"\nsite_directory = \"/srv\"\nretry = 3\n",
        );

        let config = load_resource_config(&path).await.unwrap();
        assert_eq!(config.get("host"), Some(&json!("www.example.com")));
        assert_eq!(config.get("retry"), Some(&json!(3)));
    }

    #[tokio::test]
    async fn test_load_yaml_and_json() {
        let dir = TempDir::new().unwrap();
        let yaml = write(&dir, "waffles.yml", "host: h\nsudo: true\n");
        let json_path = write(&dir, "waffles.json", r#"{"host": "h", "wait": "5"}"#);

        let config = load_resource_config(&yaml).await.unwrap();
        assert_eq!(config.get("sudo"), Some(&json!(true)));

        let config = load_resource_config(&json_path).await.unwrap();
        assert_eq!(config.get("wait"), Some(&json!("5")));
    }

    #[tokio::test]
    async fn test_empty_yaml_is_empty_map() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.yaml", "");
        let config = load_resource_config(&path).await.unwrap();
        assert!(config.keys().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let err = load_resource_config(Path::new("waffles.ini")).await.unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_resource_config(&dir.path().join("absent.toml"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::CONFIG_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_map_top_level_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "list.json", "[1, 2]");
        let err = load_resource_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
