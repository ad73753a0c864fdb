//! Application constants for Driver Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Chrome-for-Testing endpoints
pub mod endpoints {
    /// Base URL of the Chrome-for-Testing downloads page
    pub const DOWNLOADS_PAGE: &str = "https://googlechromelabs.github.io/chrome-for-testing/";

    /// Full manifest of all known versions with their per-platform downloads.
    /// Large; used for milestone search and as a fallback when the
    /// lightweight per-version document has no entry.
    pub const KNOWN_GOOD_VERSIONS: &str = "known-good-versions-with-downloads.json";

    /// Prefix marking a symbolic version request
    pub const LATEST_RELEASE_PREFIX: &str = "LATEST_RELEASE";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Driver-Fetcher/0.2 (WebDriver Binary Manager)";

    /// Default HTTP request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 100;

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Driver binary file naming
pub mod files {
    /// Driver binary filename on Windows platforms
    pub const BINARY_NAME_WINDOWS: &str = "chromedriver.exe";

    /// Driver binary filename on every other platform
    pub const BINARY_NAME_DEFAULT: &str = "chromedriver";

    /// Suffix of the cache record file next to the binary
    pub const VERSION_FILE_SUFFIX: &str = ".version";
}

/// Cross-process download lock
pub mod lock {
    use super::Duration;

    /// Name of the machine-wide lock file in the system temp directory.
    /// One lock for all platforms and all cooperating processes.
    pub const LOCK_FILE_NAME: &str = "chromedriver-downloader.lock";

    /// Extra wait allowed on top of the HTTP timeout when acquiring the lock
    pub const GRACE_PERIOD: Duration = Duration::from_secs(10);

    /// Interval between acquisition attempts
    pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
}

// Re-export commonly used constants for convenience
pub use endpoints::{DOWNLOADS_PAGE, LATEST_RELEASE_PREFIX};
pub use http::{DEFAULT_TIMEOUT_SECS, USER_AGENT};
