//! Output serialization
//!
//! Encodes a [`ScoreTable`] into the bytes of any supported output format.
//! The gzip text variants wrap the encoded stream in a gzip envelope; the
//! compressed Parquet variant instead uses Parquet's own gzip column codec,
//! matching how the snapshots are consumed downstream. No format emits a
//! synthetic row-index column.

use std::io::Write;
use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, RecordBatchOptions, StringArray};
use arrow_schema::{DataType, Field, Schema};
use flate2::write::GzEncoder;
use flate2::Compression;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression as ColumnCompression;
use parquet::file::properties::WriterProperties;
use serde_json::{Map, Number, Value};

use crate::app::formats::OutputFormat;
use crate::app::models::ScoreTable;
use crate::errors::PersistResult;

/// Encode a table into the bytes of the requested format
pub fn encode_table(table: &ScoreTable, format: OutputFormat) -> PersistResult<Vec<u8>> {
    match format {
        OutputFormat::Csv => encode_csv(table),
        OutputFormat::CsvGz => gzip_wrap(&encode_csv(table)?),
        OutputFormat::Json => encode_json(table),
        OutputFormat::JsonGz => gzip_wrap(&encode_json(table)?),
        OutputFormat::Jsonl => encode_jsonl(table),
        OutputFormat::JsonlGz => gzip_wrap(&encode_jsonl(table)?),
        OutputFormat::Parquet => encode_parquet(table, ColumnCompression::UNCOMPRESSED),
        OutputFormat::ParquetGz => {
            encode_parquet(table, ColumnCompression::GZIP(Default::default()))
        }
    }
}

fn encode_csv(table: &ScoreTable) -> PersistResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

fn encode_json(table: &ScoreTable) -> PersistResult<Vec<u8>> {
    let records: Vec<Value> = table.rows().iter().map(|row| row_value(table, row)).collect();
    Ok(serde_json::to_vec(&Value::Array(records))?)
}

fn encode_jsonl(table: &ScoreTable) -> PersistResult<Vec<u8>> {
    let mut buf = Vec::new();
    for row in table.rows() {
        serde_json::to_writer(&mut buf, &row_value(table, row))?;
        buf.push(b'\n');
    }
    Ok(buf)
}

/// One row as a JSON record, keyed by column header in original order
fn row_value(table: &ScoreTable, row: &[String]) -> Value {
    let mut record = Map::new();
    for (header, cell) in table.headers().iter().zip(row) {
        record.insert(header.clone(), cell_value(cell));
    }
    Value::Object(record)
}

/// Numeric-looking cells become JSON numbers, everything else stays a string
fn cell_value(cell: &str) -> Value {
    if let Ok(int) = cell.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = cell.parse::<f64>() {
        if let Some(number) = Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(cell.to_string())
}

fn encode_parquet(table: &ScoreTable, compression: ColumnCompression) -> PersistResult<Vec<u8>> {
    let fields: Vec<Field> = table
        .headers()
        .iter()
        .map(|header| Field::new(header, DataType::Utf8, false))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let columns: Vec<ArrayRef> = (0..table.headers().len())
        .map(|index| {
            let values: Vec<&str> = table
                .rows()
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
                .collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(table.len()));
    let batch = RecordBatch::try_new_with_options(schema.clone(), columns, &options)?;

    let props = WriterProperties::builder()
        .set_compression(compression)
        .build();

    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(buf)
}

fn gzip_wrap(bytes: &[u8]) -> PersistResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}
