//! On-disk binary cache for one (download root, platform) pair
//!
//! The cache is two files at the download root: the driver binary itself
//! and its version file (the [`CacheRecord`]). The record exists iff the
//! binary counts as installed. Nothing here takes the cross-process lock;
//! atomicity across processes is delegated entirely to the downloader's
//! critical section, and these operations stay safe to call for read-only
//! inspection at any time.

use std::path::{Path, PathBuf};

use crate::constants::files;
use crate::errors::CacheError;

pub mod lock;
pub mod record;

pub use lock::DownloadLock;
pub use record::CacheRecord;

/// Maps a platform identifier to its driver binary filename
///
/// Total over all platforms: anything starting with "win" (in any case)
/// gets the `.exe` name, everything else the bare name.
pub fn binary_name_for_platform(platform: &str) -> &'static str {
    let is_windows = platform
        .get(..3)
        .map_or(false, |head| head.eq_ignore_ascii_case("win"));
    if is_windows {
        files::BINARY_NAME_WINDOWS
    } else {
        files::BINARY_NAME_DEFAULT
    }
}

/// Installed state of one driver binary at a download root
#[derive(Debug, Clone)]
pub struct BinaryCache {
    root: PathBuf,
    binary_name: &'static str,
}

impl BinaryCache {
    /// Creates a cache view for the given root and platform
    pub fn new(root: impl Into<PathBuf>, platform: &str) -> Self {
        Self {
            root: root.into(),
            binary_name: binary_name_for_platform(platform),
        }
    }

    /// Download root this cache lives under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Driver binary filename for this platform
    pub fn binary_name(&self) -> &str {
        self.binary_name
    }

    /// Full path of the driver binary
    pub fn binary_path(&self) -> PathBuf {
        self.root.join(self.binary_name)
    }

    /// Full path of the version file
    pub fn version_file_path(&self) -> PathBuf {
        self.root
            .join(format!("{}{}", self.binary_name, files::VERSION_FILE_SUFFIX))
    }

    /// Whether the driver binary is present at the root
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(self.binary_path()).await.unwrap_or(false)
    }

    /// Installed version: the first line of the version file
    pub async fn current_version(&self) -> Option<String> {
        self.read_record().await.map(|record| record.version)
    }

    /// Paths extracted for the installed version, in extraction order
    pub async fn extracted_files(&self) -> Vec<String> {
        self.read_record()
            .await
            .map(|record| record.extracted_files)
            .unwrap_or_default()
    }

    /// Reads the full cache record, `None` when absent or empty
    pub async fn read_record(&self) -> Option<CacheRecord> {
        let text = tokio::fs::read_to_string(self.version_file_path())
            .await
            .ok()?;
        CacheRecord::parse(&text)
    }

    /// Writes the cache record, marking the binary installed
    ///
    /// # Errors
    ///
    /// Returns `CacheError::WriteRecord` when the version file cannot be
    /// written
    pub async fn write_record(&self, record: &CacheRecord) -> Result<(), CacheError> {
        let path = self.version_file_path();
        tokio::fs::write(&path, record.serialize())
            .await
            .map_err(|source| CacheError::WriteRecord { path, source })?;
        tracing::debug!(
            "recorded version {} with {} extracted files",
            record.version,
            record.extracted_files.len()
        );
        Ok(())
    }

    /// Removes the installed binary and everything its record names
    ///
    /// Deletes every recorded extracted file still present, then the
    /// version file, then the primary binary if it remains. Each deletion
    /// is idempotent (a file already gone is not an error), so eviction
    /// can run against a partially removed install.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Remove` when a present file cannot be deleted
    pub async fn evict(&self) -> Result<(), CacheError> {
        for file in self.extracted_files().await {
            remove_if_exists(&self.root.join(&file)).await?;
        }
        remove_if_exists(&self.version_file_path()).await?;
        remove_if_exists(&self.binary_path()).await?;
        tracing::info!("evicted {} from {}", self.binary_name, self.root.display());
        Ok(())
    }
}

/// Deletes a file, treating "already gone" as success
async fn remove_if_exists(path: &Path) -> Result<(), CacheError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CacheError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_binary_name_mapping_is_total() {
        assert_eq!(binary_name_for_platform("win32"), "chromedriver.exe");
        assert_eq!(binary_name_for_platform("WIN64"), "chromedriver.exe");
        assert_eq!(binary_name_for_platform("linux64"), "chromedriver");
        assert_eq!(binary_name_for_platform("mac-arm64"), "chromedriver");
        assert_eq!(binary_name_for_platform(""), "chromedriver");
    }

    #[tokio::test]
    async fn test_absent_cache_reads_as_empty() {
        let temp = tempdir().unwrap();
        let cache = BinaryCache::new(temp.path(), "linux64");

        assert!(!cache.exists().await);
        assert_eq!(cache.current_version().await, None);
        assert!(cache.extracted_files().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_round_trip_through_disk() {
        let temp = tempdir().unwrap();
        let cache = BinaryCache::new(temp.path(), "win32");

        let record = CacheRecord::new(
            "142.0.7444.61",
            vec!["chromedriver.exe".to_string(), "LICENSE".to_string()],
        );
        cache.write_record(&record).await.unwrap();

        assert_eq!(
            cache.current_version().await,
            Some("142.0.7444.61".to_string())
        );
        assert_eq!(
            cache.extracted_files().await,
            vec!["chromedriver.exe", "LICENSE"]
        );
    }

    #[tokio::test]
    async fn test_evict_removes_recorded_files_and_binary() {
        let temp = tempdir().unwrap();
        let cache = BinaryCache::new(temp.path(), "linux64");

        tokio::fs::write(cache.binary_path(), b"binary").await.unwrap();
        tokio::fs::write(temp.path().join("LICENSE"), b"license")
            .await
            .unwrap();
        let record = CacheRecord::new(
            "116.0.5845.96",
            vec!["chromedriver".to_string(), "LICENSE".to_string()],
        );
        cache.write_record(&record).await.unwrap();

        cache.evict().await.unwrap();

        assert!(!cache.exists().await);
        assert!(!cache.version_file_path().exists());
        assert!(!temp.path().join("LICENSE").exists());
    }

    #[tokio::test]
    async fn test_evict_tolerates_missing_files() {
        let temp = tempdir().unwrap();
        let cache = BinaryCache::new(temp.path(), "linux64");

        // Record names files that were never written; eviction of a
        // half-removed install must still succeed.
        let record = CacheRecord::new("116.0.5845.96", vec!["chromedriver".to_string()]);
        cache.write_record(&record).await.unwrap();

        cache.evict().await.unwrap();
        assert!(!cache.version_file_path().exists());

        // Evicting an already-empty cache is also fine.
        cache.evict().await.unwrap();
    }
}
