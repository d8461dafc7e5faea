//! Remote and local path planning
//!
//! Maps a snapshot date to its canonical remote location and its canonical
//! local output path. Remote existence is never checked here; a missing
//! snapshot is discovered lazily by the fetch.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use url::Url;

use crate::app::formats::OutputFormat;
use crate::constants::provider;

/// File name of the dated snapshot as published by the provider
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!(
        "{}{}{}",
        provider::SNAPSHOT_PREFIX,
        date,
        provider::SNAPSHOT_SUFFIX
    )
}

/// Canonical remote location of one dated snapshot
pub fn snapshot_url(base: &Url, date: NaiveDate) -> Url {
    // The base URL is validated as a proper base at client construction
    base.join(&snapshot_file_name(date))
        .expect("snapshot file name joins onto a validated base URL")
}

/// The redirecting alias that points at the most recent dated snapshot
pub fn current_url(base: &Url) -> Url {
    base.join(provider::CURRENT_ALIAS)
        .expect("current alias joins onto a validated base URL")
}

/// Canonical local output path: `{output_dir}/{date ISO-8601}.{extension}`
///
/// Injective in (date, format) for a fixed directory: distinct pairs can
/// never collide because the date segment and the extension are disjoint.
pub fn output_path(output_dir: &Path, date: NaiveDate, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{}.{}", date, format.extension()))
}

/// Resolve the requested output directory to an absolute path
///
/// `None` means the current working directory. Resolution happens exactly
/// once, at the CLI edge, so every downstream call receives an explicit
/// absolute directory.
pub fn resolve_output_dir(output_dir: Option<PathBuf>) -> io::Result<PathBuf> {
    match output_dir {
        Some(dir) if dir.is_absolute() => Ok(dir),
        Some(dir) => Ok(env::current_dir()?.join(dir)),
        None => env::current_dir(),
    }
}
