//! Version resolution for symbolic and literal version specs
//!
//! A version spec is either a concrete dotted version ("142.0.7444.61"),
//! which passes through untouched, or a symbolic `LATEST_RELEASE` request
//! resolved against the remote version index: the bare prefix and the four
//! channel suffixes hit the lightweight text endpoints, while a milestone
//! suffix searches the full known-versions manifest and picks the highest
//! matching build by structural comparison.
//!
//! Literal specs are not validated here; an invalid literal surfaces later
//! as a link-not-found failure, not a resolution failure.

use url::Url;

use crate::app::client::DriverClient;
use crate::app::links::types::KnownGoodVersions;
use crate::constants::endpoints;
use crate::errors::{ResolutionError, TransportError};

pub mod ordering;

pub use ordering::DriverVersion;

/// A parsed version request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// Concrete version string, passed through without validation
    Literal(String),
    /// Latest release on a named channel
    Channel(Channel),
    /// Highest build whose leading component equals the milestone
    Milestone(u32),
}

/// A named release track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stable,
    Beta,
    Dev,
    Canary,
}

impl Channel {
    /// Text endpoint name answering with this channel's current version
    pub fn endpoint_name(&self) -> &'static str {
        match self {
            Channel::Stable => "LATEST_RELEASE_STABLE",
            Channel::Beta => "LATEST_RELEASE_BETA",
            Channel::Dev => "LATEST_RELEASE_DEV",
            Channel::Canary => "LATEST_RELEASE_CANARY",
        }
    }
}

impl VersionSpec {
    /// Parses a version spec string
    ///
    /// Specs not starting with the symbolic prefix are literals. The bare
    /// prefix means the default (stable) channel. Prefix and channel names
    /// match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError::UnknownPattern` for a symbolic spec whose
    /// suffix is neither a channel name nor a milestone number
    pub fn parse(spec: &str) -> Result<Self, ResolutionError> {
        let prefix_len = endpoints::LATEST_RELEASE_PREFIX.len();
        let starts_symbolic = spec
            .get(..prefix_len)
            .map_or(false, |head| {
                head.eq_ignore_ascii_case(endpoints::LATEST_RELEASE_PREFIX)
            });
        if !starts_symbolic {
            return Ok(Self::Literal(spec.to_string()));
        }

        let suffix = &spec[prefix_len..];
        if suffix.trim().is_empty() {
            // Bare LATEST_RELEASE defaults to the stable channel
            return Ok(Self::Channel(Channel::Stable));
        }

        if let Some(value) = suffix.strip_prefix('_') {
            match value.to_ascii_uppercase().as_str() {
                "STABLE" => return Ok(Self::Channel(Channel::Stable)),
                "BETA" => return Ok(Self::Channel(Channel::Beta)),
                "DEV" => return Ok(Self::Channel(Channel::Dev)),
                "CANARY" => return Ok(Self::Channel(Channel::Canary)),
                _ => {
                    if let Ok(milestone) = value.parse::<u32>() {
                        return Ok(Self::Milestone(milestone));
                    }
                }
            }
        }

        Err(ResolutionError::UnknownPattern {
            spec: spec.to_string(),
        })
    }
}

/// Resolves version specs against the remote version index
#[derive(Debug)]
pub struct VersionResolver<'a> {
    client: &'a DriverClient,
    base_url: &'a Url,
}

impl<'a> VersionResolver<'a> {
    /// Creates a resolver against the given index base URL
    pub fn new(client: &'a DriverClient, base_url: &'a Url) -> Self {
        Self { client, base_url }
    }

    /// Turns a version spec into a concrete version string
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError` for an unknown symbolic pattern, a failed
    /// or unparsable index fetch, or a milestone with no published build
    pub async fn resolve(&self, spec: &str) -> Result<String, ResolutionError> {
        match VersionSpec::parse(spec)? {
            VersionSpec::Literal(version) => Ok(version),
            VersionSpec::Channel(channel) => self.fetch_channel_version(spec, channel).await,
            VersionSpec::Milestone(milestone) => self.resolve_milestone(spec, milestone).await,
        }
    }

    /// Fetches a channel's current version from its text endpoint
    async fn fetch_channel_version(
        &self,
        spec: &str,
        channel: Channel,
    ) -> Result<String, ResolutionError> {
        let url = self
            .join(channel.endpoint_name())
            .map_err(|source| ResolutionError::Endpoint {
                spec: spec.to_string(),
                source,
            })?;

        let version =
            self.client
                .get_text(&url)
                .await
                .map_err(|source| ResolutionError::Endpoint {
                    spec: spec.to_string(),
                    source,
                })?;
        tracing::info!("resolved {} to {}", spec, version);
        Ok(version)
    }

    /// Searches the full manifest for the highest build of a milestone
    async fn resolve_milestone(
        &self,
        spec: &str,
        milestone: u32,
    ) -> Result<String, ResolutionError> {
        let url = self
            .join(endpoints::KNOWN_GOOD_VERSIONS)
            .map_err(|source| ResolutionError::Endpoint {
                spec: spec.to_string(),
                source,
            })?;

        let manifest: KnownGoodVersions =
            self.client
                .get_json(&url)
                .await
                .map_err(|source| ResolutionError::Endpoint {
                    spec: spec.to_string(),
                    source,
                })?;

        let version = select_latest_for_milestone(&manifest, milestone)
            .ok_or(ResolutionError::MilestoneNotFound { milestone })?;
        tracing::info!("resolved {} to {}", spec, version);
        Ok(version.to_string())
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

/// Picks the highest version whose leading component equals `milestone`
///
/// Comparison is structural over the four numeric components; manifest
/// entries that do not parse as a 4-component version are skipped. The
/// matching entry's original string is returned, not a re-rendering.
pub fn select_latest_for_milestone(
    manifest: &KnownGoodVersions,
    milestone: u32,
) -> Option<&str> {
    manifest
        .versions
        .iter()
        .filter_map(|entry| {
            let parsed = DriverVersion::parse(&entry.version)?;
            (parsed.milestone() == u64::from(milestone)).then_some((parsed, entry))
        })
        .max_by_key(|(parsed, _)| *parsed)
        .map(|(_, entry)| entry.version.as_str())
}
