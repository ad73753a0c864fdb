//! Command handlers for the Driver Fetcher CLI
//!
//! This module implements the handlers that coordinate between CLI
//! arguments and the core application functionality.

use tracing::info;

use crate::app::{download_for, ChromeDriverDownloader, DownloadOutcome};
use crate::cli::args::{default_platform, DownloadArgs, EvictArgs, GlobalArgs, StatusArgs};
use crate::config::FetcherConfig;
use crate::errors::{FetcherError, Result};

/// Handle the download command
pub async fn handle_download(global: &GlobalArgs, args: DownloadArgs) -> Result<()> {
    let config = load_config(global).await?;

    let outcome = if let Some(name) = &args.name {
        info!("downloading configured driver instance '{}'", name);
        download_for(&config, name).await?
    } else {
        let platform = args
            .platform
            .as_deref()
            .unwrap_or_else(|| default_platform())
            .to_string();
        info!("downloading {} for {}", args.version, platform);
        let downloader = ChromeDriverDownloader::new(&config)?;
        downloader.download(&args.version, &platform).await
    };

    report_outcome(outcome)
}

/// Handle the status command
pub async fn handle_status(global: &GlobalArgs, args: StatusArgs) -> Result<()> {
    let config = load_config(global).await?;
    let platform = args.platform.as_deref().unwrap_or_else(|| default_platform());

    let downloader = ChromeDriverDownloader::new(&config)?;
    let cache = downloader.binary_cache(platform);

    println!("binary:  {}", cache.binary_path().display());
    match cache.read_record().await {
        Some(record) => {
            println!("version: {}", record.version);
            println!("files:   {}", record.extracted_files.join(", "));
        }
        None => println!("version: (not installed)"),
    }
    if !cache.exists().await {
        println!("note:    binary file is missing");
    }
    Ok(())
}

/// Handle the evict command
pub async fn handle_evict(global: &GlobalArgs, args: EvictArgs) -> Result<()> {
    let config = load_config(global).await?;
    let platform = args.platform.as_deref().unwrap_or_else(|| default_platform());

    let downloader = ChromeDriverDownloader::new(&config)?;
    let cache = downloader.binary_cache(platform);

    match cache.current_version().await {
        Some(version) => println!("evicting {} {}", cache.binary_name(), version),
        None => println!("nothing recorded for {}, cleaning up anyway", platform),
    }
    cache.evict().await?;
    Ok(())
}

/// Loads configuration and applies global CLI overrides
async fn load_config(global: &GlobalArgs) -> Result<FetcherConfig> {
    let mut config = FetcherConfig::load(global.config.clone()).await?;
    if let Some(root) = &global.download_root {
        config.download.download_root = Some(root.clone());
    }
    Ok(config)
}

/// Prints an outcome and converts failures into a process error
fn report_outcome(outcome: DownloadOutcome) -> Result<()> {
    if outcome.successful {
        println!("{:?}", outcome.action);
        Ok(())
    } else {
        Err(FetcherError::generic(
            outcome
                .error_message
                .unwrap_or_else(|| "download failed".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DownloaderAction;

    #[test]
    fn test_report_outcome_success() {
        let outcome = DownloadOutcome::success(DownloaderAction::BinaryDownloaded);
        assert!(report_outcome(outcome).is_ok());
    }

    #[test]
    fn test_report_outcome_failure_carries_message() {
        let outcome = DownloadOutcome {
            successful: false,
            action: DownloaderAction::Unknown,
            error_message: Some("no download URL".to_string()),
        };
        match report_outcome(outcome) {
            Err(FetcherError::Generic { message }) => assert_eq!(message, "no download URL"),
            other => panic!("expected Generic error, got {:?}", other),
        }
    }
}
