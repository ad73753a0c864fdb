//! Command-line argument parsing for Driver Fetcher
//!
//! This module defines the CLI structure using clap derive macros: a
//! download command for fetching driver binaries, plus status and evict
//! commands for inspecting and clearing the local cache.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Driver Fetcher - download and cache browser-automation driver binaries
#[derive(Parser, Debug)]
#[command(
    name = "driver_fetcher",
    version,
    about = "Download and cache browser-automation driver binaries",
    long_about = "Downloads platform-specific browser-automation driver binaries, resolving \
symbolic version requests (latest stable, latest for a milestone) against the remote \
version index, and installs each version exactly once per machine."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Download root directory (overrides configuration)
    #[arg(long, global = true, value_name = "DIR")]
    pub download_root: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a driver binary
    Download(DownloadArgs),

    /// Show the installed driver version and its files
    Status(StatusArgs),

    /// Remove the installed driver binary and its record
    Evict(EvictArgs),
}

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Configured driver instance to download (from the config file)
    #[arg(short, long, conflicts_with_all = ["version", "platform"])]
    pub name: Option<String>,

    /// Version spec: a concrete version, LATEST_RELEASE,
    /// LATEST_RELEASE_{STABLE|BETA|DEV|CANARY}, or LATEST_RELEASE_{milestone}
    #[arg(long, default_value = "LATEST_RELEASE")]
    pub version: String,

    /// Target platform (defaults to the host platform)
    #[arg(short, long)]
    pub platform: Option<String>,
}

/// Arguments for the status command
#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Target platform (defaults to the host platform)
    #[arg(short, long)]
    pub platform: Option<String>,
}

/// Arguments for the evict command
#[derive(Args, Debug, Clone)]
pub struct EvictArgs {
    /// Target platform (defaults to the host platform)
    #[arg(short, long)]
    pub platform: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level derived from the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.global.very_verbose {
            "debug"
        } else if self.global.verbose {
            "info"
        } else if self.global.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Platform identifier of the host, in index naming
pub fn default_platform() -> &'static str {
    if cfg!(windows) {
        "win64"
    } else if cfg!(target_os = "macos") {
        if cfg!(target_arch = "aarch64") {
            "mac-arm64"
        } else {
            "mac-x64"
        }
    } else {
        "linux64"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_defaults() {
        let cli = Cli::try_parse_from(["driver_fetcher", "download"]).unwrap();
        match cli.command {
            Commands::Download(args) => {
                assert_eq!(args.version, "LATEST_RELEASE");
                assert!(args.platform.is_none());
                assert!(args.name.is_none());
            }
            other => panic!("expected Download, got {:?}", other),
        }
    }

    #[test]
    fn test_name_conflicts_with_version() {
        let result = Cli::try_parse_from([
            "driver_fetcher",
            "download",
            "--name",
            "chrome",
            "--version",
            "142.0.7444.61",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_from_flags() {
        let cli = Cli::try_parse_from(["driver_fetcher", "--verbose", "status"]).unwrap();
        assert_eq!(cli.log_level(), "info");

        let cli = Cli::try_parse_from(["driver_fetcher", "--quiet", "status"]).unwrap();
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn test_default_platform_is_known() {
        let platform = default_platform();
        assert!(["win64", "mac-arm64", "mac-x64", "linux64"].contains(&platform));
    }
}
