//! Response models for the Chrome-for-Testing download index
//!
//! Two document shapes share the same inner `downloads` structure: the
//! lightweight `{version}.json` per-version document and the full
//! `known-good-versions-with-downloads.json` manifest.

use serde::Deserialize;

/// Lightweight per-version document (`{version}.json`)
#[derive(Debug, Clone, Deserialize)]
pub struct VersionDocument {
    /// Per-binary download lists for this version
    #[serde(default)]
    pub downloads: DownloadSets,
}

/// Full manifest of all known versions with downloads
#[derive(Debug, Clone, Deserialize)]
pub struct KnownGoodVersions {
    /// Every published version, oldest first
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
}

/// One version entry in the full manifest
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    /// Dotted version string, e.g. "116.0.5845.110"
    pub version: String,
    /// Per-binary download lists; absent for versions predating a binary
    #[serde(default)]
    pub downloads: DownloadSets,
}

/// Download lists keyed by binary name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadSets {
    /// Chromedriver archives, one per platform
    #[serde(default)]
    pub chromedriver: Vec<DownloadEntry>,
}

/// A single platform's downloadable archive
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadEntry {
    /// Platform identifier, e.g. "win32", "linux64", "mac-x64"
    pub platform: String,
    /// Direct archive URL
    pub url: String,
}

impl DownloadSets {
    /// Finds the chromedriver URL for a platform by case-insensitive equality
    pub fn chromedriver_url_for(&self, platform: &str) -> Option<&str> {
        self.chromedriver
            .iter()
            .find(|entry| entry.platform.eq_ignore_ascii_case(platform))
            .map(|entry| entry.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> VersionDocument {
        serde_json::from_str(
            r#"{
                "timestamp": "2023-08-16T00:21:06.617Z",
                "downloads": {
                    "chrome": [
                        {"platform": "linux64", "url": "https://example.test/chrome-linux64.zip"}
                    ],
                    "chromedriver": [
                        {"platform": "linux64", "url": "https://example.test/chromedriver-linux64.zip"},
                        {"platform": "win32", "url": "https://example.test/chromedriver-win32.zip"}
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_platform_match_is_case_insensitive() {
        let document = sample_document();
        let url = document.downloads.chromedriver_url_for("WIN32");
        assert_eq!(url, Some("https://example.test/chromedriver-win32.zip"));
    }

    #[test]
    fn test_unknown_platform_yields_none() {
        let document = sample_document();
        assert!(document.downloads.chromedriver_url_for("mac-arm64").is_none());
    }

    #[test]
    fn test_manifest_tolerates_missing_chromedriver_section() {
        // Early versions in the manifest predate chromedriver archives and
        // carry only chrome downloads.
        let manifest: KnownGoodVersions = serde_json::from_str(
            r#"{
                "versions": [
                    {"version": "113.0.5672.0", "downloads": {"chrome": []}},
                    {"version": "115.0.5763.0"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.versions.len(), 2);
        assert!(manifest.versions[0]
            .downloads
            .chromedriver_url_for("win32")
            .is_none());
    }
}
