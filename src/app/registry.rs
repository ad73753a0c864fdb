//! Downloader registry: configured instance name → downloader dispatch
//!
//! Downloader selection is a closed enum, not dynamic lookup: every
//! supported driver family is a [`DriverKind`] variant and adding one means
//! adding a variant plus its match arm. Configured instances in the config
//! file bind a caller-facing name ("chrome") to a kind, a version spec, and
//! a platform.

use crate::app::downloader::{ChromeDriverDownloader, DownloadOutcome};
use crate::config::FetcherConfig;
use crate::errors::{FetcherError, Result};

/// Supported driver downloader families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// Chromedriver via the Chrome-for-Testing index
    Chrome,
}

impl DriverKind {
    /// Resolves a configured downloader type name
    ///
    /// Accepts the short family name and the spelled-out downloader name,
    /// case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "chrome" | "chromedriver" | "chromedriverdownloader" => Some(Self::Chrome),
            _ => None,
        }
    }

    /// Canonical short name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
        }
    }
}

/// Downloads the binary for a configured driver instance
///
/// Looks up the instance by name, dispatches on its downloader kind, and
/// runs the download with the instance's version spec and platform.
///
/// # Errors
///
/// Returns an error when no instance has that name or its downloader type
/// is unknown; download failures are reported inside the returned outcome,
/// not as errors
pub async fn download_for(config: &FetcherConfig, name: &str) -> Result<DownloadOutcome> {
    let instance = config.driver(name).ok_or_else(|| {
        FetcherError::generic(format!("no configured driver instance named '{name}'"))
    })?;

    let kind = DriverKind::from_name(&instance.downloader).ok_or_else(|| {
        FetcherError::generic(format!(
            "unknown downloader type '{}' for driver instance '{}'",
            instance.downloader, name
        ))
    })?;

    match kind {
        DriverKind::Chrome => {
            let downloader = ChromeDriverDownloader::new(config)?;
            Ok(downloader
                .download(&instance.version, &instance.platform)
                .await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriverInstance;

    #[test]
    fn test_kind_resolution_is_case_insensitive() {
        assert_eq!(DriverKind::from_name("chrome"), Some(DriverKind::Chrome));
        assert_eq!(
            DriverKind::from_name("ChromeDriverDownloader"),
            Some(DriverKind::Chrome)
        );
        assert_eq!(DriverKind::from_name("gecko"), None);
    }

    #[tokio::test]
    async fn test_download_for_unknown_instance_fails() {
        let config = FetcherConfig::default();
        let result = download_for(&config, "chrome").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_download_for_unknown_downloader_type_fails() {
        let mut config = FetcherConfig::default();
        config.drivers.push(DriverInstance {
            name: "chrome".to_string(),
            downloader: "gecko".to_string(),
            version: "LATEST_RELEASE".to_string(),
            platform: "linux64".to_string(),
        });

        let result = download_for(&config, "chrome").await;
        match result {
            Err(FetcherError::Generic { message }) => {
                assert!(message.contains("unknown downloader type"));
            }
            other => panic!("expected Generic error, got {:?}", other),
        }
    }
}
