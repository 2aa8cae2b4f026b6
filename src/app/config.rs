//! Application configuration
//!
//! Settings for the process itself. Resource configuration lives in
//! [`crate::config`].

use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Relative configuration paths are resolved against this
    pub working_dir: PathBuf,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Result<Self> {
        let working_dir = std::env::current_dir()
            .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;

        Ok(Self {
            verbose,
            working_dir,
        })
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Get the log filter based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            working_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        let levels: Vec<_> = (0..4)
            .map(|verbose| AppConfig { verbose, ..Default::default() }.log_level())
            .collect();
        assert_eq!(
            levels,
            vec!["info", "debug", "trace", "trace"]
        );
    }

    #[test]
    fn test_resolve_relative_paths() {
        let config = AppConfig::default().with_working_dir(PathBuf::from("/work"));
        assert_eq!(config.resolve(Path::new("site.toml")), PathBuf::from("/work/site.toml"));
        assert_eq!(config.resolve(Path::new("/etc/site.toml")), PathBuf::from("/etc/site.toml"));
    }
}
