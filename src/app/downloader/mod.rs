//! Download orchestration for chromedriver binaries
//!
//! [`ChromeDriverDownloader`] composes the leaf components into the full
//! pipeline: resolve the version spec, resolve the download link, fetch the
//! archive bytes, then, under the machine-wide lock, re-check the cache
//! and skip, install, or update. The network fetch happens strictly before
//! the lock is taken so network latency never extends the filesystem
//! critical section, and the fetched bytes are simply dropped when the
//! double-check finds the version already installed.
//!
//! Nothing here retries, and nothing escapes as an error:
//! [`ChromeDriverDownloader::download`] converts every failure into an
//! unsuccessful [`DownloadOutcome`].

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;
use zip::ZipArchive;

use crate::app::cache::{BinaryCache, CacheRecord, DownloadLock};
use crate::app::client::{ClientConfig, DriverClient};
use crate::app::links::LinkResolver;
use crate::app::version::VersionResolver;
use crate::config::FetcherConfig;
use crate::constants::{endpoints, lock};
use crate::errors::{ExtractionError, FetcherError, Result};

pub mod outcome;

pub use outcome::{DownloadOutcome, DownloaderAction};

/// Orchestrates chromedriver downloads against a download root
#[derive(Debug)]
pub struct ChromeDriverDownloader {
    client: DriverClient,
    base_url: Url,
    download_root: PathBuf,
    lock_timeout: Duration,
}

impl ChromeDriverDownloader {
    /// Creates a downloader from the application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let base_url = Url::parse(endpoints::DOWNLOADS_PAGE).expect("Base URL should be valid");
        Self::with_base_url(config, base_url)
    }

    /// Creates a downloader against a custom index base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn with_base_url(config: &FetcherConfig, base_url: Url) -> Result<Self> {
        let client_config = ClientConfig::with_timeout_secs(config.download.http_timeout_secs);
        let client = DriverClient::new(&client_config)?;

        Ok(Self {
            client,
            base_url,
            download_root: config.resolve_download_root(),
            // Bounded lock wait: however long the slowest peer's install can
            // reasonably take (its own HTTP timeout) plus a grace period.
            lock_timeout: client_config.request_timeout + lock::GRACE_PERIOD,
        })
    }

    /// Base URL of the downloads index
    pub fn downloads_page(&self) -> &Url {
        &self.base_url
    }

    /// Cache view for a platform under this downloader's root
    pub fn binary_cache(&self, platform: &str) -> BinaryCache {
        BinaryCache::new(&self.download_root, platform)
    }

    /// Downloads and installs the requested driver version
    ///
    /// The one public entry point. Never fails outward: every error is
    /// converted into an unsuccessful outcome with `action` left
    /// [`DownloaderAction::Unknown`] and the cause chain in the message.
    pub async fn download(&self, version_spec: &str, platform: &str) -> DownloadOutcome {
        match self.try_download(version_spec, platform).await {
            Ok(action) => {
                tracing::info!("download of {} for {}: {:?}", version_spec, platform, action);
                DownloadOutcome::success(action)
            }
            Err(err) => {
                tracing::error!(
                    "download of {} for {} failed: {}",
                    version_spec,
                    platform,
                    err.chain_message()
                );
                DownloadOutcome::failure(&err)
            }
        }
    }

    async fn try_download(&self, version_spec: &str, platform: &str) -> Result<DownloaderAction> {
        let version = VersionResolver::new(&self.client, &self.base_url)
            .resolve(version_spec)
            .await?;

        let link = LinkResolver::new(&self.client, &self.base_url)
            .link_for(&version, platform)
            .await?
            .ok_or_else(|| FetcherError::LinkNotFound {
                version: version.clone(),
                platform: platform.to_string(),
            })?;

        // Fetch before taking the lock; the critical section is filesystem
        // mutation only.
        let bytes = self.client.get_bytes(&link).await?;

        self.install_archive(platform, bytes, &version).await
    }

    /// Installs pre-fetched archive bytes under the machine-wide lock
    ///
    /// Re-checks the cache after acquiring the lock: another process may
    /// have installed the same version while the fetch was in flight, in
    /// which case the bytes are discarded and the call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns lock, cache, or extraction errors; the caller converts them
    /// into an unsuccessful outcome
    pub async fn install_archive(
        &self,
        platform: &str,
        bytes: Vec<u8>,
        version: &str,
    ) -> Result<DownloaderAction> {
        let cache = self.binary_cache(platform);
        let _lock = DownloadLock::acquire(self.lock_timeout).await?;

        if cache.exists().await {
            if let Some(installed) = cache.current_version().await {
                // Literal, case-insensitive comparison, not structural.
                if installed.eq_ignore_ascii_case(version) {
                    tracing::info!("version {} already installed, skipping", version);
                    return Ok(DownloaderAction::NoDownloadNeeded);
                }
            }

            cache.evict().await?;
            self.extract_and_record(&cache, bytes, version).await?;
            Ok(DownloaderAction::BinaryUpdated)
        } else {
            self.extract_and_record(&cache, bytes, version).await?;
            Ok(DownloaderAction::BinaryDownloaded)
        }
    }

    /// Extracts the archive into the root and writes the cache record
    async fn extract_and_record(
        &self,
        cache: &BinaryCache,
        bytes: Vec<u8>,
        version: &str,
    ) -> Result<()> {
        let root = cache.root().to_path_buf();
        let extracted = tokio::task::spawn_blocking(move || extract_flattened(&root, &bytes))
            .await
            .map_err(ExtractionError::Join)??;

        let record = CacheRecord::new(version, extracted);
        if let Err(err) = cache.write_record(&record).await {
            // Files without a record would be invisible to future eviction;
            // take them back out.
            for name in &record.extracted_files {
                let _ = tokio::fs::remove_file(cache.root().join(name)).await;
            }
            return Err(err.into());
        }
        Ok(())
    }
}

/// Unpacks a zip archive, flattening every entry into `root`
///
/// Entries without a file-name component (directory markers) are skipped.
/// Each extracted file lands directly in `root` under its file-name
/// component, and the returned list preserves encounter order; it becomes
/// the cache record that future eviction trusts. On failure, files written
/// so far are removed so nothing is orphaned outside a record.
fn extract_flattened(root: &Path, bytes: &[u8]) -> std::result::Result<Vec<String>, ExtractionError> {
    std::fs::create_dir_all(root).map_err(ExtractionError::Staging)?;

    let mut staged = tempfile::NamedTempFile::new().map_err(ExtractionError::Staging)?;
    io::Write::write_all(&mut staged, bytes).map_err(ExtractionError::Staging)?;
    let archive_file = staged.reopen().map_err(ExtractionError::Staging)?;

    let mut archive = ZipArchive::new(archive_file)?;
    let mut extracted: Vec<String> = Vec::new();

    let result = (|| -> std::result::Result<(), ExtractionError> {
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let Some(name) = entry_file_name(&entry) else {
                continue;
            };

            let destination = root.join(&name);
            let mut output = File::create(&destination).map_err(|source| ExtractionError::Io {
                path: destination.clone(),
                source,
            })?;
            // Record before copying so a failed copy still gets cleaned up.
            extracted.push(name);
            io::copy(&mut entry, &mut output).map_err(|source| ExtractionError::Io {
                path: destination.clone(),
                source,
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&destination, std::fs::Permissions::from_mode(mode))
                        .map_err(|source| ExtractionError::Io {
                            path: destination.clone(),
                            source,
                        })?;
                }
            }
        }
        Ok(())
    })();

    match result {
        Ok(()) => Ok(extracted),
        Err(err) => {
            for name in &extracted {
                let _ = std::fs::remove_file(root.join(name));
            }
            Err(err)
        }
    }
}

/// File-name component of a zip entry, `None` for directory markers
fn entry_file_name(entry: &zip::read::ZipFile<'_>) -> Option<String> {
    if entry.is_dir() {
        return None;
    }
    let path = entry.enclosed_name()?;
    let name = path.file_name()?;
    Some(name.to_string_lossy().into_owned())
}
