//! Command-line interface components
//!
//! This module contains CLI-specific code for the Driver Fetcher
//! application: argument parsing and command handlers.

pub mod args;
pub mod commands;

pub use args::{
    default_platform, Cli, Commands, DownloadArgs, EvictArgs, GlobalArgs, StatusArgs,
};
pub use commands::{handle_download, handle_evict, handle_status};
