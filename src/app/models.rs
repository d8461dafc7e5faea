//! Snapshot table model
//!
//! One day's published scoring table, decoded from the provider's
//! gzip-compressed CSV payload. The payload carries a single model-metadata
//! line ahead of the column header, which is skipped during parsing.

use std::collections::HashSet;
use std::io::Read;

use flate2::read::GzDecoder;

use crate::constants::provider;
use crate::errors::FetchResult;

/// Parsed snapshot table: column headers plus rows of string cells
#[derive(Debug, Clone)]
pub struct ScoreTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    id_column: usize,
}

impl ScoreTable {
    /// Decode a gzip-compressed CSV payload as published by the provider
    pub fn from_gzip_csv(bytes: &[u8]) -> FetchResult<Self> {
        let mut text = String::new();
        GzDecoder::new(bytes).read_to_string(&mut text)?;
        Self::from_csv_text(&text)
    }

    /// Parse the decompressed payload text
    ///
    /// The first line is the provider's model-metadata comment; the column
    /// header follows it.
    pub fn from_csv_text(text: &str) -> FetchResult<Self> {
        let body = text.split_once('\n').map(|(_, rest)| rest).unwrap_or("");

        let mut reader = csv::Reader::from_reader(body.as_bytes());
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        // Identifier column located by header name; header-renamed
        // snapshots fall back to the first column
        let id_column = headers
            .iter()
            .position(|h| h == provider::ID_COLUMN)
            .unwrap_or(0);

        Ok(Self {
            headers,
            rows,
            id_column,
        })
    }

    /// Column headers in original order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in original order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only rows whose identifier cell is a member of `ids`
    ///
    /// An empty set means "keep all rows". Relative row order and all other
    /// columns are preserved unchanged.
    pub fn retain_ids(&mut self, ids: &HashSet<String>) {
        if ids.is_empty() {
            return;
        }
        let id_column = self.id_column;
        self.rows
            .retain(|row| row.get(id_column).is_some_and(|cell| ids.contains(cell)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SAMPLE: &str = "\
#model_version:v2023.03.01,score_date:2023-07-14T00:00:00+0000
cve_id,epss,percentile
CVE-2021-44228,0.97565,0.99995
CVE-2014-0160,0.97234,0.99821
CVE-2023-1234,0.00042,0.05120
";

    #[test]
    fn test_parse_skips_metadata_line() {
        let table = ScoreTable::from_csv_text(SAMPLE).unwrap();
        assert_eq!(table.headers(), ["cve_id", "epss", "percentile"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0][0], "CVE-2021-44228");
    }

    #[test]
    fn test_gzip_round_trip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let table = ScoreTable::from_gzip_csv(&compressed).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_filter_preserves_order_and_columns() {
        let mut table = ScoreTable::from_csv_text(SAMPLE).unwrap();
        let ids: HashSet<String> = ["CVE-2023-1234", "CVE-2021-44228", "CVE-1999-0001"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        table.retain_ids(&ids);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][0], "CVE-2021-44228");
        assert_eq!(table.rows()[1][0], "CVE-2023-1234");
        // Non-identifier columns untouched
        assert_eq!(table.rows()[1][1], "0.00042");
    }

    #[test]
    fn test_empty_filter_keeps_all_rows() {
        let mut table = ScoreTable::from_csv_text(SAMPLE).unwrap();
        table.retain_ids(&HashSet::new());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_id_column_falls_back_to_first() {
        let renamed = "\
#meta
cve,epss,percentile
CVE-2021-44228,0.97565,0.99995
CVE-2014-0160,0.97234,0.99821
";
        let mut table = ScoreTable::from_csv_text(renamed).unwrap();
        let ids: HashSet<String> = [String::from("CVE-2014-0160")].into_iter().collect();
        table.retain_ids(&ids);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][0], "CVE-2014-0160");
    }

    #[test]
    fn test_payload_with_no_rows() {
        let empty = "#meta\ncve_id,epss,percentile\n";
        let table = ScoreTable::from_csv_text(empty).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 3);
    }
}
