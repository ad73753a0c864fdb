//! Machine-wide cross-process download lock
//!
//! A single named lock file in the system temp directory serializes every
//! install's filesystem critical section across all platforms and all
//! cooperating processes on the host. On Unix the lock is `flock(2)`
//! advisory locking, acquired non-blocking in a polling loop so the async
//! runtime never parks a thread inside a blocking lock wait; on non-Unix
//! platforms locking degrades to a no-op and concurrent processes may race.
//!
//! The lock deliberately covers all platforms at once rather than one lock
//! per platform: simultaneous installs into the same download root share
//! files (LICENSE, THIRD_PARTY notices), so cross-platform serialization is
//! the correct, if slower, behavior.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;

use crate::constants::lock;
use crate::errors::LockError;

/// Guard holding the machine-wide download lock until dropped
///
/// Dropping the guard releases the lock unconditionally, on success and
/// error paths alike.
#[derive(Debug)]
pub struct DownloadLock {
    _file: File,
}

impl DownloadLock {
    /// Path of the shared lock file
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(lock::LOCK_FILE_NAME)
    }

    /// Acquires the machine-wide lock, waiting at most `timeout`
    ///
    /// # Errors
    ///
    /// Returns `LockError::Timeout` when the lock is still held elsewhere
    /// after the bounded wait, or `LockError::Io` when the lock file cannot
    /// be created or locked
    pub async fn acquire(timeout: Duration) -> Result<Self, LockError> {
        Self::acquire_at(&Self::default_path(), timeout).await
    }

    /// Acquires a lock on an explicit path; tests use private paths
    pub async fn acquire_at(path: &Path, timeout: Duration) -> Result<Self, LockError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| LockError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        loop {
            match try_lock_exclusive(&file) {
                Ok(true) => return Ok(Self { _file: file }),
                Ok(false) => {
                    if Instant::now() >= deadline {
                        tracing::warn!(
                            "download lock at {} still held after {:?}",
                            path.display(),
                            timeout
                        );
                        return Err(LockError::Timeout { waited: timeout });
                    }
                    tokio::time::sleep(lock::POLL_INTERVAL).await;
                }
                Err(source) => {
                    return Err(LockError::Io {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            }
        }
    }
}

/// Attempts a non-blocking exclusive `flock`; `Ok(false)` means held elsewhere
#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> io::Result<bool> {
    use std::os::unix::io::AsRawFd;

    // SAFETY: the descriptor comes from an open `File` owned by the caller
    // for the duration of the call.
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    if err.kind() == io::ErrorKind::WouldBlock {
        Ok(false)
    } else {
        Err(err)
    }
}

/// Advisory locking unavailable; concurrent processes may race
#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> io::Result<bool> {
    Ok(true)
}
