//! Command-line argument parsing for EPSS Fetcher
//!
//! Defines the CLI structure using clap derive macros. Date arguments are
//! accepted as raw strings and canonicalized by the date resolver so that
//! malformed input surfaces as a proper [`DateError`] naming the offending
//! value.
//!
//! [`DateError`]: crate::errors::DateError

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::formats::OutputFormat;
use crate::errors::ValidationError;

/// EPSS Fetcher - mirror daily EPSS vulnerability score snapshots
#[derive(Parser, Debug)]
#[command(
    name = "epss_fetcher",
    version,
    about = "Mirror daily FIRST EPSS vulnerability score snapshots",
    long_about = "Synchronizes a local mirror of the daily EPSS score snapshots published \
at epss.cyentia.com, converting each day's table into the requested output format.
Already-mirrored dates are skipped, so re-running a range request is cheap."
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
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download EPSS score snapshots for a date or a date range
    Download(DownloadArgs),
}

/// Arguments for the download command
#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// Single snapshot date (YYYY-MM-DD); cannot be combined with a range
    #[arg(short, long, value_name = "DATE")]
    pub date: Option<String>,

    /// First date of the range (YYYY-MM-DD); defaults to the earliest
    /// published snapshot
    #[arg(long, value_name = "DATE")]
    pub min_date: Option<String>,

    /// Last date of the range (YYYY-MM-DD); defaults to the most recent
    /// published snapshot
    #[arg(long, value_name = "DATE")]
    pub max_date: Option<String>,

    /// CVE identifier to retain (repeatable); all rows when omitted
    #[arg(long = "cve-id", value_name = "CVE_ID")]
    pub cve_ids: Vec<String>,

    /// Output directory; defaults to the current working directory
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::CsvGz)]
    pub output_format: OutputFormat,

    /// Overwrite existing files
    #[arg(long)]
    pub overwrite: bool,

    /// Number of concurrent download workers; defaults to available
    /// parallelism
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl DownloadArgs {
    /// Reject argument combinations that cannot be satisfied
    ///
    /// A single date and a range bound are mutually exclusive, and a worker
    /// count of zero is meaningless. Runs before any work begins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date.is_some() && (self.min_date.is_some() || self.max_date.is_some()) {
            return Err(ValidationError::ConflictingDateArgs);
        }

        if self.workers == Some(0) {
            return Err(ValidationError::ZeroWorkers);
        }

        Ok(())
    }
}
