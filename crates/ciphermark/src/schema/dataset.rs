//! Structural schema of an attested dataset.

use serde::{Deserialize, Serialize};

use crate::commitment;
use crate::error::{CiphermarkError, Result};
use crate::inference;
use crate::input::RawTable;

use super::types::ColumnType;

/// Largest column count the attestation program accepts.
pub const MAX_COLUMNS: usize = 32;

/// Largest row count the attestation program accepts.
pub const MAX_ROWS: usize = 1_000_000;

/// Structural description of a tabular dataset: what gets attested, nothing
/// about the contents themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Number of columns (header cell count).
    pub column_count: usize,
    /// Inferred type per column, in header order.
    pub column_types: Vec<ColumnType>,
    /// Number of data rows (rows minus header).
    pub row_count: usize,
    /// Rolling-hash fingerprint of the raw content, 16 lowercase hex chars.
    pub content_hash: String,
}

impl DatasetSchema {
    /// Build the schema for a parsed table.
    ///
    /// `raw_text` must be the exact text the table was parsed from: the
    /// content fingerprint covers it untrimmed.
    pub fn extract(raw_text: &str, table: &RawTable) -> Self {
        Self {
            column_count: table.column_count(),
            column_types: inference::infer_types(table),
            row_count: table.row_count(),
            content_hash: commitment::hash_content(raw_text),
        }
    }

    /// Check that the schema fits the attestable ranges.
    ///
    /// Column count must be in `1..=MAX_COLUMNS`, row count in
    /// `1..=MAX_ROWS`. The violated field is named in the error.
    pub fn validate(&self) -> Result<()> {
        if self.column_count < 1 || self.column_count > MAX_COLUMNS {
            return Err(CiphermarkError::SchemaBounds {
                field: "column_count",
                value: self.column_count,
                min: 1,
                max: MAX_COLUMNS,
            });
        }
        if self.row_count < 1 || self.row_count > MAX_ROWS {
            return Err(CiphermarkError::SchemaBounds {
                field: "row_count",
                value: self.row_count,
                min: 1,
                max: MAX_ROWS,
            });
        }
        Ok(())
    }
}
