//! CSV-backed layer tables
//!
//! Stands in for the notebook runtime's query result: a CSV with a header
//! row becomes the table snapshot handed to the plugin. Every cell is a
//! string, which is exactly what the row filter expects.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tm_core::TableData;

/// Load a layer table from a CSV file with a header row.
pub fn table_from_csv(path: &Path) -> Result<TableData> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    table_from_reader(file)
}

/// Load a layer table from any CSV byte stream.
pub fn table_from_reader(reader: impl Read) -> Result<TableData> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns: Vec<String> = csv_reader
        .headers()
        .context("failed to read CSV header")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.context("failed to read CSV record")?;
        rows.push(
            record
                .iter()
                .map(|cell| Value::String(cell.to_string()))
                .collect(),
        );
    }
    Ok(TableData::new(columns, rows))
}
