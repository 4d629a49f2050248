//! Schema extraction and representation.

mod dataset;
mod types;

pub use dataset::{DatasetSchema, MAX_COLUMNS, MAX_ROWS};
pub use types::ColumnType;
