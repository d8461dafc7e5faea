//! Command-line interface components
//!
//! CLI-specific code for the EPSS Fetcher application: argument parsing
//! and command handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DownloadArgs, GlobalArgs};
pub use commands::handle_download;
