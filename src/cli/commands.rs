//! Command handlers for EPSS Fetcher CLI
//!
//! Bridges parsed arguments to the core sync machinery: validates inputs,
//! canonicalizes dates, resolves the output directory once, and reports the
//! outcome to the user.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::app::{dates, paths, sync_range, SnapshotClient, SyncOptions};
use crate::cli::DownloadArgs;
use crate::errors::Result;

/// Handle the download command
///
/// Validates arguments, builds the provider client and runs the range sync,
/// surfacing the sync report on success.
pub async fn handle_download(args: DownloadArgs) -> Result<()> {
    let start = Instant::now();

    args.validate()?;
    let (min_date, max_date) = resolve_bounds(&args)?;

    let output_dir = paths::resolve_output_dir(args.output_dir.clone())?;
    let filter_ids: HashSet<String> = args.cve_ids.iter().cloned().collect();
    if !filter_ids.is_empty() {
        info!("Filtering snapshots to {} CVE id(s)", filter_ids.len());
    }

    let client = SnapshotClient::new()?;
    let options = SyncOptions {
        filter_ids,
        min_date,
        max_date,
        output_dir: output_dir.clone(),
        format: args.output_format,
        overwrite: args.overwrite,
        workers: args.workers,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["◐", "◓", "◑", "◒"]),
    );
    spinner.set_message(format!("Mirroring snapshots into {}", output_dir.display()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = sync_range(&client, &options).await;
    spinner.finish_and_clear();
    let report = result?;

    info!("Download command finished in {:?}", start.elapsed());
    println!(
        "Mirrored {} snapshot(s) into {} ({} downloaded, {} skipped)",
        report.total(),
        output_dir.display(),
        report.downloaded,
        report.skipped
    );

    Ok(())
}

/// Map the CLI date surface onto range bounds
///
/// A single `--date` becomes a one-day range; otherwise the optional bounds
/// pass through for the sync to default.
fn resolve_bounds(args: &DownloadArgs) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    if let Some(date) = args.date.as_deref() {
        let date = dates::parse_date(date)?;
        return Ok((Some(date), Some(date)));
    }

    let min = args
        .min_date
        .as_deref()
        .map(dates::parse_date)
        .transpose()?;
    let max = args
        .max_date
        .as_deref()
        .map(dates::parse_date)
        .transpose()?;
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, DateError};

    #[test]
    fn test_single_date_becomes_one_day_range() {
        let args = DownloadArgs {
            date: Some("2023-07-14".to_string()),
            ..Default::default()
        };

        let (min, max) = resolve_bounds(&args).unwrap();
        assert_eq!(min, max);
        assert_eq!(min, NaiveDate::from_ymd_opt(2023, 7, 14));
    }

    #[test]
    fn test_missing_bounds_pass_through_as_defaults() {
        let (min, max) = resolve_bounds(&DownloadArgs::default()).unwrap();
        assert_eq!(min, None);
        assert_eq!(max, None);
    }

    #[test]
    fn test_malformed_date_names_the_input() {
        let args = DownloadArgs {
            date: Some("07/14/2023".to_string()),
            ..Default::default()
        };

        match resolve_bounds(&args) {
            Err(AppError::Date(DateError::InvalidDate { input })) => {
                assert_eq!(input, "07/14/2023");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }
}
