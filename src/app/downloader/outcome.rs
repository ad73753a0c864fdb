//! Download outcome reporting
//!
//! Every call to [`crate::app::ChromeDriverDownloader::download`] answers
//! with a [`DownloadOutcome`], failures included. Errors never propagate
//! out of the downloader; they become an unsuccessful outcome whose message
//! carries the whole cause chain.

use crate::errors::FetcherError;

/// What the downloader did for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloaderAction {
    /// Nothing happened; the request failed before an install decision
    Unknown,
    /// Requested version was already installed
    NoDownloadNeeded,
    /// Fresh install into an empty cache
    BinaryDownloaded,
    /// A different installed version was evicted and replaced
    BinaryUpdated,
}

/// Result of one download request
///
/// Invariants: `error_message` is present iff `successful` is false, and
/// `action` is [`DownloaderAction::Unknown`] on every failure so callers
/// can branch on `action` deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Whether the requested binary is installed after this call
    pub successful: bool,
    /// Action performed
    pub action: DownloaderAction,
    /// Failure description, with underlying causes appended
    pub error_message: Option<String>,
}

impl DownloadOutcome {
    /// Successful outcome for the given action
    pub fn success(action: DownloaderAction) -> Self {
        Self {
            successful: true,
            action,
            error_message: None,
        }
    }

    /// Failed outcome carrying the error's full cause chain
    pub fn failure(error: &FetcherError) -> Self {
        Self {
            successful: false,
            action: DownloaderAction::Unknown,
            error_message: Some(error.chain_message()),
        }
    }
}
