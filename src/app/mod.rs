//! Core application logic for Driver Fetcher
//!
//! This module contains the main application components: the HTTP client,
//! version resolution, download-link resolution, the on-disk binary cache,
//! and the download orchestration that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use driver_fetcher::app::{ChromeDriverDownloader, DownloaderAction};
//! use driver_fetcher::config::FetcherConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetcherConfig::load(None).await?;
//! let downloader = ChromeDriverDownloader::new(&config)?;
//!
//! let outcome = downloader.download("LATEST_RELEASE", "linux64").await;
//! match outcome.action {
//!     DownloaderAction::NoDownloadNeeded => println!("already installed"),
//!     action => println!("done: {:?}", action),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod downloader;
pub mod links;
pub mod registry;
pub mod version;

// Re-export main public API
pub use cache::{binary_name_for_platform, BinaryCache, CacheRecord, DownloadLock};
pub use client::{ClientConfig, DriverClient};
pub use downloader::{ChromeDriverDownloader, DownloadOutcome, DownloaderAction};
pub use links::LinkResolver;
pub use registry::{download_for, DriverKind};
pub use version::{Channel, DriverVersion, VersionResolver, VersionSpec};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Ensure public API is accessible
        assert_eq!(binary_name_for_platform("win32"), "chromedriver.exe");
        assert_eq!(DriverKind::Chrome.name(), "chrome");
    }
}
