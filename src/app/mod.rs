//! Core application logic for EPSS Fetcher
//!
//! Contains the snapshot client, date resolution, path planning, table
//! model, output serialization and the concurrent sync orchestration.
//!
//! # Examples
//!
//! ```rust,no_run
//! use epss_fetcher::app::{sync_range, OutputFormat, SnapshotClient, SyncOptions};
//!
//! # async fn example() -> epss_fetcher::errors::Result<()> {
//! let client = SnapshotClient::new()?;
//! let options = SyncOptions {
//!     filter_ids: Default::default(),
//!     min_date: None,
//!     max_date: None,
//!     output_dir: "/var/mirror/epss".into(),
//!     format: OutputFormat::CsvGz,
//!     overwrite: false,
//!     workers: None,
//! };
//! let report = sync_range(&client, &options).await?;
//! println!("downloaded {}, skipped {}", report.downloaded, report.skipped);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dates;
pub mod fetcher;
pub mod formats;
pub mod models;
pub mod paths;
pub mod serialize;
pub mod sync;

// Re-export main public API
pub use client::SnapshotClient;
pub use dates::{date_range, min_supported_date, parse_date, DateInput, DateRange};
pub use fetcher::{fetch_and_persist, FetchOutcome};
pub use formats::OutputFormat;
pub use models::ScoreTable;
pub use serialize::encode_table;
pub use sync::{default_worker_count, sync_range, SyncOptions, SyncReport};
