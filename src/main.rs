//! Driver Fetcher CLI application
//!
//! Command-line interface for downloading and caching browser-automation
//! driver binaries.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use driver_fetcher::cli::{handle_download, handle_evict, handle_status, Cli, Commands};
use driver_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize logging based on verbosity
    init_logging(&cli);

    info!("Driver Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    // Execute the appropriate command
    match cli.command {
        Commands::Download(args) => handle_download(&cli.global, args).await,
        Commands::Status(args) => handle_status(&cli.global, args).await,
        Commands::Evict(args) => handle_evict(&cli.global, args).await,
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("driver_fetcher={}", log_level).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
