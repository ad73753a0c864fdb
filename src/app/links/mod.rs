//! Download link resolution for a concrete version and platform
//!
//! Two sources are consulted in order: the lightweight `{version}.json`
//! document, then the full known-good-versions manifest as a fallback. A
//! link is "not found" only when both sources were reachable and neither
//! contained a matching entry; an unreachable or malformed source is a
//! transport failure instead, so callers can tell the two apart.

use url::Url;

use crate::app::client::DriverClient;
use crate::constants::endpoints;
use crate::errors::TransportError;

pub mod types;

pub use types::{DownloadEntry, DownloadSets, KnownGoodVersions, VersionDocument, VersionEntry};

/// Resolves (version, platform) pairs to direct archive URLs
#[derive(Debug)]
pub struct LinkResolver<'a> {
    client: &'a DriverClient,
    base_url: &'a Url,
}

impl<'a> LinkResolver<'a> {
    /// Creates a resolver against the given index base URL
    pub fn new(client: &'a DriverClient, base_url: &'a Url) -> Self {
        Self { client, base_url }
    }

    /// Looks up the archive URL for an exact version and platform
    ///
    /// Platform comparison is case-insensitive string equality in both
    /// sources. Returns `Ok(None)` when neither source has a matching
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when either source is unreachable or
    /// unparsable, distinct from the not-found case
    pub async fn link_for(
        &self,
        version: &str,
        platform: &str,
    ) -> Result<Option<Url>, TransportError> {
        if let Some(url) = self.from_version_document(version, platform).await? {
            return Ok(Some(url));
        }
        self.from_known_good_versions(version, platform).await
    }

    /// Tries the lightweight per-version document
    ///
    /// A 404 means the version is not in the lightweight index (old builds
    /// are) and falls through to the manifest without error.
    async fn from_version_document(
        &self,
        version: &str,
        platform: &str,
    ) -> Result<Option<Url>, TransportError> {
        let url = self.join(&format!("{version}.json"))?;
        let document: Option<VersionDocument> = self.client.get_json_opt(&url).await?;

        match document {
            Some(document) => {
                match document.downloads.chromedriver_url_for(platform) {
                    Some(link) => Ok(Some(parse_entry_url(link)?)),
                    None => {
                        tracing::debug!(
                            "per-version document for {} has no {} entry",
                            version,
                            platform
                        );
                        Ok(None)
                    }
                }
            }
            None => Ok(None),
        }
    }

    /// Falls back to the full known-good-versions manifest
    async fn from_known_good_versions(
        &self,
        version: &str,
        platform: &str,
    ) -> Result<Option<Url>, TransportError> {
        let url = self.join(endpoints::KNOWN_GOOD_VERSIONS)?;
        let manifest: KnownGoodVersions = self.client.get_json(&url).await?;

        let link = manifest
            .versions
            .iter()
            .find(|entry| entry.version.eq_ignore_ascii_case(version))
            .and_then(|entry| entry.downloads.chromedriver_url_for(platform));

        match link {
            Some(link) => Ok(Some(parse_entry_url(link)?)),
            None => {
                tracing::debug!("manifest has no {} entry for {}", platform, version);
                Ok(None)
            }
        }
    }

    fn join(&self, segment: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(segment)
            .map_err(|source| TransportError::InvalidUrl {
                url: format!("{}{}", self.base_url, segment),
                source,
            })
    }
}

/// Parses a manifest-provided URL string
fn parse_entry_url(link: &str) -> Result<Url, TransportError> {
    Url::parse(link).map_err(|source| TransportError::InvalidUrl {
        url: link.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_lookup_matches_version_and_platform() {
        let manifest: KnownGoodVersions = serde_json::from_str(
            r#"{
                "versions": [
                    {
                        "version": "76.0.3809.25",
                        "downloads": {
                            "chromedriver": [
                                {"platform": "win32", "url": "https://example.test/76/win32.zip"}
                            ]
                        }
                    },
                    {
                        "version": "142.0.7444.61",
                        "downloads": {
                            "chromedriver": [
                                {"platform": "linux64", "url": "https://example.test/142/linux64.zip"},
                                {"platform": "win32", "url": "https://example.test/142/win32.zip"}
                            ]
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        let entry = manifest
            .versions
            .iter()
            .find(|entry| entry.version.eq_ignore_ascii_case("142.0.7444.61"))
            .and_then(|entry| entry.downloads.chromedriver_url_for("WIN32"));
        assert_eq!(entry, Some("https://example.test/142/win32.zip"));

        let missing = manifest
            .versions
            .iter()
            .find(|entry| entry.version.eq_ignore_ascii_case("76.0.3809.25"))
            .and_then(|entry| entry.downloads.chromedriver_url_for("linux64"));
        assert!(missing.is_none());
    }

    #[test]
    fn test_bad_entry_url_is_transport_error() {
        let result = parse_entry_url("not a url");
        match result {
            Err(TransportError::InvalidUrl { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("expected InvalidUrl, got {:?}", other),
        }
    }
}
