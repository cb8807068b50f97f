//! Tabular data handed over by the host on every render call

use serde_json::Value;

/// One render call's snapshot of the host's query result.
///
/// Rows are ordered sequences of cells addressed by position. The snapshot
/// is ephemeral: the host hands over a fresh one on every result refresh
/// and nothing in the plugin holds on to it between calls.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    /// Column display names, by position.
    pub columns: Vec<String>,

    /// Row-major cells. A row may be shorter than `columns`; missing
    /// cells read as absent.
    pub rows: Vec<Vec<Value>>,
}

impl TableData {
    /// Create a snapshot from column names and row-major cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows in the snapshot.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, col)`, if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
