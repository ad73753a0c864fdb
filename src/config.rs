//! Configuration management for Driver Fetcher
//!
//! Provides unified configuration with zero-config defaults, multi-source
//! loading (explicit path, project-local file, user config directory), and
//! TOML serialization. Configuration carries the download root, the HTTP
//! timeout, and the table of named driver instances the registry resolves.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::http;
use crate::errors::{FetcherError, Result};

/// Unified application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FetcherConfig {
    /// Download and caching settings
    #[serde(default)]
    pub download: DownloadConfig,
    /// Named driver instances resolvable by the registry
    #[serde(default)]
    pub drivers: Vec<DriverInstance>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Download and caching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory holding cached binaries and version files.
    /// `None` defaults to the running executable's directory.
    pub download_root: Option<PathBuf>,
    /// Timeout for HTTP requests, in seconds; also bounds the wait for the
    /// cross-process lock
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_http_timeout_secs() -> u64 {
    http::DEFAULT_TIMEOUT_SECS
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_root: None,
            http_timeout_secs: http::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// A configured driver instance: which downloader, which version, where
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverInstance {
    /// Instance name callers refer to, e.g. "chrome"
    pub name: String,
    /// Downloader type name, resolved by the registry
    pub downloader: String,
    /// Version spec, literal or symbolic
    pub version: String,
    /// Target platform identifier
    pub platform: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level for the application
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl FetcherConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, or first standard location found)
    ///
    /// # Errors
    ///
    /// Returns an error when an explicitly specified file is missing or
    /// either source fails to parse
    pub async fn load(config_file_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(FetcherError::generic(format!(
                        "Specified config file not found: {}",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Find a configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from("./driver-fetcher.toml")];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        for path in search_paths {
            if path.exists() {
                debug!("found config file: {}", path.display());
                return Some(path);
            }
        }
        None
    }

    /// Default config file path in the user's config directory
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("driver-fetcher").join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            FetcherError::generic(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: FetcherConfig = toml::from_str(&content).map_err(|e| {
            FetcherError::generic(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Download root, defaulting to the executable's own directory
    ///
    /// Tools of this kind conventionally keep helper binaries next to the
    /// test runner that uses them.
    pub fn resolve_download_root(&self) -> PathBuf {
        if let Some(root) = &self.download.download_root {
            return root.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Configured HTTP timeout as a duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.download.http_timeout_secs)
    }

    /// Looks up a configured driver instance by name
    pub fn driver(&self, name: &str) -> Option<&DriverInstance> {
        self.drivers
            .iter()
            .find(|instance| instance.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(
            config.download.http_timeout_secs,
            http::DEFAULT_TIMEOUT_SECS
        );
        assert!(config.download.download_root.is_none());
        assert!(config.drivers.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = FetcherConfig::load(Some(config_path)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_loading_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("driver-fetcher.toml");

        let test_config = r#"
[download]
download_root = "/opt/drivers"
http_timeout_secs = 45

[[drivers]]
name = "chrome"
downloader = "chrome"
version = "LATEST_RELEASE_STABLE"
platform = "linux64"

[logging]
level = "debug"
"#;
        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = FetcherConfig::load(Some(config_path)).await.unwrap();

        assert_eq!(config.download.http_timeout_secs, 45);
        assert_eq!(config.http_timeout(), Duration::from_secs(45));
        assert_eq!(
            config.resolve_download_root(),
            PathBuf::from("/opt/drivers")
        );
        assert_eq!(config.logging.level, "debug");

        let instance = config.driver("CHROME").unwrap();
        assert_eq!(instance.version, "LATEST_RELEASE_STABLE");
        assert_eq!(instance.platform, "linux64");
        assert!(config.driver("edge").is_none());
    }

    #[tokio::test]
    async fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        tokio::fs::write(&config_path, "[download]\nhttp_timeout_secs = 10\n")
            .await
            .unwrap();

        let config = FetcherConfig::load(Some(config_path)).await.unwrap();
        assert_eq!(config.download.http_timeout_secs, 10);
        assert!(config.drivers.is_empty());
        assert_eq!(config.logging.level, "info");
    }
}
