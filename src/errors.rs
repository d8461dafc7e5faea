//! Error types for EPSS Fetcher
//!
//! Each functional domain owns a dedicated error enum; the top-level
//! [`AppError`] aggregates them transparently so callers can use a single
//! `Result` alias while error messages stay specific to the failure site.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Date parsing, range construction and latest-date discovery errors
#[derive(Error, Debug)]
pub enum DateError {
    /// Input could not be interpreted as a calendar date
    #[error("could not interpret {input:?} as a calendar date (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    /// Range start is after range end
    #[error("date range start {min} is after end {max}")]
    InvertedRange { min: NaiveDate, max: NaiveDate },

    /// Latest-snapshot probe did not return a redirect
    #[error("latest-snapshot probe returned HTTP {status} with no Location header")]
    DiscoveryNoRedirect { status: u16 },

    /// Redirect target did not contain a recognizable snapshot date
    #[error("no snapshot date found in redirect target {location:?}")]
    DiscoveryNoDate { location: String },

    /// HTTP transport failed during the latest-snapshot probe
    #[error("latest-snapshot probe failed")]
    DiscoveryHttp(#[from] reqwest::Error),
}

/// Output format recognition errors
#[derive(Error, Debug)]
pub enum FormatError {
    /// No registered format extension matches the path
    #[error("no known output format matches path {path:?}")]
    UnknownExtension { path: PathBuf },
}

/// Remote snapshot fetch and decode errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed
    #[error("snapshot request failed")]
    Http(#[from] reqwest::Error),

    /// Provider base URL cannot serve as a base for snapshot paths
    #[error("invalid provider base URL {url:?}")]
    InvalidBaseUrl { url: String },

    /// Server returned a non-success status for a dated snapshot
    #[error("snapshot {date} returned HTTP {status}")]
    Status { date: NaiveDate, status: u16 },

    /// Payload could not be gunzipped
    #[error("failed to decompress snapshot payload")]
    Gunzip(#[from] std::io::Error),

    /// Payload could not be parsed as CSV
    #[error("failed to parse snapshot table")]
    Csv(#[from] csv::Error),
}

/// Local persistence errors
#[derive(Error, Debug)]
pub enum PersistError {
    /// File or directory I/O failed
    #[error("file I/O error")]
    Io(#[from] std::io::Error),

    /// CSV encoding failed
    #[error("CSV encoding failed")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed
    #[error("JSON encoding failed")]
    Json(#[from] serde_json::Error),

    /// Parquet encoding failed
    #[error("Parquet encoding failed")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow record batch construction failed
    #[error("Arrow batch construction failed")]
    Arrow(#[from] arrow_schema::ArrowError),
}

/// Command-line input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A single date and a range bound were supplied together
    #[error("--date cannot be combined with --min-date or --max-date")]
    ConflictingDateArgs,

    /// Worker count of zero was requested
    #[error("number of workers must be greater than 0")]
    ZeroWorkers,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Date resolution error
    #[error(transparent)]
    Date(#[from] DateError),

    /// Format recognition error
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Persistence error
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// CLI validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Date(_) => "date",
            AppError::Format(_) => "format",
            AppError::Fetch(_) => "fetch",
            AppError::Persist(_) => "persist",
            AppError::Validation(_) => "validation",
            AppError::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Date resolution result type alias
pub type DateResult<T> = std::result::Result<T, DateError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Persistence result type alias
pub type PersistResult<T> = std::result::Result<T, PersistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let err = AppError::from(ValidationError::ConflictingDateArgs);
        assert_eq!(err.category(), "validation");

        let err = AppError::from(DateError::InvalidDate {
            input: "not-a-date".to_string(),
        });
        assert_eq!(err.category(), "date");
    }

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = DateError::InvalidDate {
            input: "2023-13-99".to_string(),
        };
        assert!(err.to_string().contains("2023-13-99"));

        let min = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let max = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = DateError::InvertedRange { min, max };
        assert!(err.to_string().contains("2024-02-02"));
        assert!(err.to_string().contains("2024-01-01"));
    }
}
