//! Output format descriptors
//!
//! The fixed set of persisted tabular formats. Each format knows its file
//! extension and whether gzip-style compression applies; the inverse lookup
//! [`OutputFormat::from_path`] uses longest-suffix matching so a compressed
//! variant is never mistaken for its uncompressed stem.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;

use crate::errors::FormatError;

/// A persisted tabular output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text CSV
    #[value(name = "csv")]
    Csv,
    /// Gzip-compressed CSV
    #[value(name = "csv.gz")]
    CsvGz,
    /// JSON array of records
    #[value(name = "json")]
    Json,
    /// Gzip-compressed JSON array of records
    #[value(name = "json.gz")]
    JsonGz,
    /// Line-delimited JSON records
    #[value(name = "jsonl")]
    Jsonl,
    /// Gzip-compressed line-delimited JSON records
    #[value(name = "jsonl.gz")]
    JsonlGz,
    /// Columnar Parquet
    #[value(name = "parquet")]
    Parquet,
    /// Parquet with gzip column compression
    #[value(name = "parquet.gz")]
    ParquetGz,
}

impl OutputFormat {
    /// Every supported format, in declaration order
    pub const ALL: [OutputFormat; 8] = [
        OutputFormat::Csv,
        OutputFormat::CsvGz,
        OutputFormat::Json,
        OutputFormat::JsonGz,
        OutputFormat::Jsonl,
        OutputFormat::JsonlGz,
        OutputFormat::Parquet,
        OutputFormat::ParquetGz,
    ];

    /// File extension for this format, without the leading dot
    pub const fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::CsvGz => "csv.gz",
            OutputFormat::Json => "json",
            OutputFormat::JsonGz => "json.gz",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::JsonlGz => "jsonl.gz",
            OutputFormat::Parquet => "parquet",
            OutputFormat::ParquetGz => "parquet.gz",
        }
    }

    /// Whether gzip-style compression applies to this format
    pub const fn is_compressed(&self) -> bool {
        matches!(
            self,
            OutputFormat::CsvGz
                | OutputFormat::JsonGz
                | OutputFormat::JsonlGz
                | OutputFormat::ParquetGz
        )
    }

    /// Inverse lookup: match the longest known format-extension suffix
    ///
    /// Longest-suffix matching resolves the ambiguity between a compressed
    /// format and its uncompressed stem (`.csv` vs `.csv.gz`).
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownExtension`] when no registered
    /// extension matches.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let name = path.to_string_lossy();
        Self::ALL
            .iter()
            .copied()
            .filter(|format| name.ends_with(&format!(".{}", format.extension())))
            .max_by_key(|format| format.extension().len())
            .ok_or_else(|| FormatError::UnknownExtension {
                path: path.to_path_buf(),
            })
    }
}

impl Default for OutputFormat {
    /// The provider publishes gzip-compressed CSV, so mirroring defaults to it
    fn default() -> Self {
        OutputFormat::CsvGz
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, FormatError> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.extension() == s)
            .ok_or_else(|| FormatError::UnknownExtension { path: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extension_round_trip() {
        for format in OutputFormat::ALL {
            assert_eq!(format.extension().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_from_path_inverts_every_extension() {
        for format in OutputFormat::ALL {
            let path = PathBuf::from(format!("/data/2023-07-14.{}", format.extension()));
            assert_eq!(OutputFormat::from_path(&path).unwrap(), format);
        }
    }

    #[test]
    fn test_from_path_prefers_longest_suffix() {
        // ".csv.gz" also ends with ".gz"-less ".csv"-like stems; the
        // compressed variant must win.
        let path = PathBuf::from("/data/2023-07-14.csv.gz");
        assert_eq!(OutputFormat::from_path(&path).unwrap(), OutputFormat::CsvGz);

        let path = PathBuf::from("/data/2023-07-14.csv");
        assert_eq!(OutputFormat::from_path(&path).unwrap(), OutputFormat::Csv);

        let path = PathBuf::from("/data/2023-07-14.parquet.gz");
        assert_eq!(
            OutputFormat::from_path(&path).unwrap(),
            OutputFormat::ParquetGz
        );
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let path = PathBuf::from("/data/2023-07-14.xlsx");
        assert!(matches!(
            OutputFormat::from_path(&path),
            Err(FormatError::UnknownExtension { .. })
        ));
    }

    #[test]
    fn test_compression_flags() {
        assert!(!OutputFormat::Csv.is_compressed());
        assert!(OutputFormat::CsvGz.is_compressed());
        assert!(!OutputFormat::Parquet.is_compressed());
        assert!(OutputFormat::ParquetGz.is_compressed());
    }

    #[test]
    fn test_default_format_is_provider_native() {
        assert_eq!(OutputFormat::default(), OutputFormat::CsvGz);
    }
}
