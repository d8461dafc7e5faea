//! Concurrent range synchronization
//!
//! Fans one [`fetch_and_persist`] invocation per date across a bounded
//! worker pool. Tasks share no mutable state and write to disjoint paths,
//! so no cross-task coordination is needed; the only singleton operation is
//! the latest-date probe, issued at most once per sync when no explicit
//! maximum date was given.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::app::client::SnapshotClient;
use crate::app::dates::{date_range, min_supported_date};
use crate::app::fetcher::{fetch_and_persist, FetchOutcome};
use crate::app::formats::OutputFormat;
use crate::constants::workers;
use crate::errors::{AppError, Result};

/// All inputs of a range synchronization, threaded explicitly
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// CVE identifiers to retain; empty means "keep all rows"
    pub filter_ids: HashSet<String>,
    /// Range start; defaults to the minimum supported date and is clamped
    /// up to it when earlier
    pub min_date: Option<NaiveDate>,
    /// Range end; defaults to one latest-date discovery probe
    pub max_date: Option<NaiveDate>,
    /// Absolute output directory
    pub output_dir: PathBuf,
    /// Output format for every date in the range
    pub format: OutputFormat,
    /// Replace already-mirrored files
    pub overwrite: bool,
    /// Worker pool size; defaults to available parallelism
    pub workers: Option<usize>,
}

/// Counts of what a sync actually did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Snapshots fetched and written
    pub downloaded: usize,
    /// Dates skipped because their file already existed
    pub skipped: usize,
}

impl SyncReport {
    /// Total dates processed
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped
    }
}

/// Worker pool size when the caller does not override it
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(workers::FALLBACK_WORKER_COUNT)
}

/// Mirror every date in the requested range
///
/// Dispatches per-date work through `buffer_unordered`, a bounded pool
/// rather than a task per date. Every in-flight task is awaited before
/// returning; the first error (in completion order) is then surfaced, and
/// files of dates that completed stay on disk.
pub async fn sync_range(client: &SnapshotClient, opts: &SyncOptions) -> Result<SyncReport> {
    let min = opts
        .min_date
        .map(|date| date.max(min_supported_date()))
        .unwrap_or_else(min_supported_date);
    let max = match opts.max_date {
        Some(date) => date,
        None => client.resolve_latest_date().await?,
    };

    let dates = date_range(min, max)?;
    let worker_count = opts.workers.unwrap_or_else(default_worker_count).max(1);
    info!(
        "Syncing snapshots {} through {} with {} workers",
        min, max, worker_count
    );

    let mut results = stream::iter(dates)
        .map(|date| async move {
            let outcome = fetch_and_persist(
                client,
                date,
                &opts.filter_ids,
                &opts.output_dir,
                opts.format,
                opts.overwrite,
            )
            .await;
            (date, outcome)
        })
        .buffer_unordered(worker_count);

    let mut report = SyncReport::default();
    let mut first_error: Option<AppError> = None;

    while let Some((date, result)) = results.next().await {
        match result {
            Ok(FetchOutcome::Downloaded) => report.downloaded += 1,
            Ok(FetchOutcome::SkippedExisting) => report.skipped += 1,
            Err(error) => {
                warn!("Snapshot {} failed ({}): {}", date, error.category(), error);
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }
    }

    if let Some(error) = first_error {
        return Err(error);
    }

    info!(
        "Sync complete: {} downloaded, {} skipped",
        report.downloaded, report.skipped
    );
    Ok(report)
}
