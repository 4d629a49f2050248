//! Parsed tabular data.

/// Raw parsed table: a header row plus data rows of text cells.
///
/// Rows are stored exactly as split. A short row keeps its missing trailing
/// cells absent rather than padded; consumers treat an absent cell the same
/// as an empty one.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header cells (row 0 of the input).
    pub header: Vec<String>,
    /// Data rows (rows 1 and onward).
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a new raw table.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Number of columns, defined by the header cell count.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a data cell, if the row has one at that index.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Values at a column index across all data rows.
    ///
    /// Yields `None` for rows too short to have a cell at that index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()))
    }
}
