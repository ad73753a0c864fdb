//! Error types for Driver Fetcher
//!
//! This module defines the error taxonomy for all components of the
//! application. Every failure category a download can hit has its own enum so
//! the orchestrator can report precise, actionable messages. None of these
//! escape [`crate::app::ChromeDriverDownloader::download`]; the orchestrator
//! converts them all into an unsuccessful [`crate::app::DownloadOutcome`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Remote endpoint failures, distinct from "the entry was not found"
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// Request failed before a response arrived (DNS, connect, timeout)
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Endpoint answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body could not be parsed as the expected JSON shape
    #[error("failed to parse response from {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A download URL in a manifest entry was not a valid URL
    #[error("invalid download URL in manifest: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Version resolution errors: a symbolic spec could not be turned into a
/// concrete version
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// Spec starts with the symbolic prefix but matches no known pattern
    #[error(
        "unknown version pattern '{spec}'. Supported patterns: LATEST_RELEASE, \
         LATEST_RELEASE_STABLE, LATEST_RELEASE_BETA, LATEST_RELEASE_DEV, \
         LATEST_RELEASE_CANARY, LATEST_RELEASE_XXX (milestone), or a specific version number"
    )]
    UnknownPattern { spec: String },

    /// A remote version index could not be fetched or parsed
    #[error("failed to resolve version spec '{spec}'")]
    Endpoint {
        spec: String,
        #[source]
        source: TransportError,
    },

    /// The known-versions list has no entry for the requested milestone
    #[error("no known version with milestone {milestone}")]
    MilestoneNotFound { milestone: u32 },
}

/// Binary cache errors: version-file and binary I/O at the download root
#[derive(Error, Debug)]
pub enum CacheError {
    /// Version file could not be written
    #[error("failed to write version file {path}")]
    WriteRecord {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cached file could not be removed during eviction
    #[error("failed to remove cached file {path}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cross-process lock errors
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock was not acquired within the bounded wait
    #[error("could not acquire download lock within {waited:?}")]
    Timeout { waited: Duration },

    /// Lock file could not be created or locked
    #[error("failed to open lock file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Archive extraction errors during install
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Downloaded bytes are not a readable zip archive
    #[error("downloaded archive is corrupt")]
    Archive(#[from] zip::result::ZipError),

    /// Archive bytes could not be staged to temporary storage
    #[error("failed to stage downloaded archive")]
    Staging(#[source] std::io::Error),

    /// An extracted file could not be written to the download root
    #[error("failed to extract {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking extraction task was cancelled or panicked
    #[error("extraction task failed")]
    Join(#[from] tokio::task::JoinError),
}

/// Top-level application error that can represent any failure category
#[derive(Error, Debug)]
pub enum FetcherError {
    /// Version resolution failed
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Both link sources were reachable but neither had a matching entry
    #[error("cannot find download URL for version {version} and platform {platform}")]
    LinkNotFound { version: String, platform: String },

    /// Remote endpoint failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Binary cache failure
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Lock acquisition failure
    #[error(transparent)]
    Lock(#[from] LockError),

    /// Archive extraction failure
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Generic application error with context
    #[error("{message}")]
    Generic { message: String },
}

impl FetcherError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Full message including every underlying cause, innermost last.
    ///
    /// Mirrors what callers expect to see in
    /// [`crate::app::DownloadOutcome::error_message`]: the whole causal chain
    /// joined into one line.
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            FetcherError::Resolution(_) => "resolution",
            FetcherError::LinkNotFound { .. } => "link-not-found",
            FetcherError::Transport(_) => "transport",
            FetcherError::Cache(_) => "cache",
            FetcherError::Lock(_) => "lock",
            FetcherError::Extraction(_) => "extraction",
            FetcherError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FetcherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_message_includes_causes() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only fs");
        let err = FetcherError::Cache(CacheError::WriteRecord {
            path: PathBuf::from("/opt/drivers/chromedriver.version"),
            source,
        });

        let message = err.chain_message();
        assert!(message.contains("failed to write version file"));
        assert!(message.contains("read-only fs"));
    }

    #[test]
    fn test_link_not_found_message_names_version_and_platform() {
        let err = FetcherError::LinkNotFound {
            version: "142.0.7444.61".to_string(),
            platform: "win32".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("142.0.7444.61"));
        assert!(message.contains("win32"));
    }

    #[test]
    fn test_error_categories() {
        let err = FetcherError::Resolution(ResolutionError::UnknownPattern {
            spec: "LATEST_RELEASE_FOO".to_string(),
        });
        assert_eq!(err.category(), "resolution");

        let err = FetcherError::Lock(LockError::Timeout {
            waited: Duration::from_secs(110),
        });
        assert_eq!(err.category(), "lock");
    }
}
