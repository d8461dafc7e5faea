//! Single-date fetch, filter and persist
//!
//! The per-date unit of work: check local existence, fetch the remote
//! table, apply the identifier filter, encode and write. Re-running over an
//! already-mirrored date does no network work. There is no temp-file
//! atomicity and no retry here; a failed write may leave a truncated file
//! that a later overwrite-enabled run replaces.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::app::client::SnapshotClient;
use crate::app::formats::OutputFormat;
use crate::app::paths::output_path;
use crate::app::serialize::encode_table;
use crate::errors::Result;

/// What a single-date invocation actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Snapshot was fetched and written
    Downloaded,
    /// Local file already existed and overwrite was not requested
    SkippedExisting,
}

/// Mirror one dated snapshot into `output_dir` in the requested format
///
/// Steps: existence short-circuit, directory creation, fetch, filter,
/// encode, write. The existence check runs before any network activity, so
/// completed dates cost nothing on re-runs.
pub async fn fetch_and_persist(
    client: &SnapshotClient,
    date: NaiveDate,
    filter_ids: &HashSet<String>,
    output_dir: &Path,
    format: OutputFormat,
    overwrite: bool,
) -> Result<FetchOutcome> {
    let path = output_path(output_dir, date, format);

    if !overwrite && path.exists() {
        debug!("Skipping {} because it already exists", path.display());
        return Ok(FetchOutcome::SkippedExisting);
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut table = client.fetch_snapshot(date).await?;
    table.retain_ids(filter_ids);

    let bytes = encode_table(&table, format)?;
    tokio::fs::write(&path, bytes).await?;

    info!(
        "Mirrored snapshot {} ({} rows) to {}",
        date,
        table.len(),
        path.display()
    );
    Ok(FetchOutcome::Downloaded)
}
