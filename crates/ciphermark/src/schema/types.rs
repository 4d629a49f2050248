//! Column type classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inferred value type for a column.
///
/// Variant names serialize capitalized so a stored schema and the
/// commitment carrier text always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Whole numbers (ASCII digits only).
    Integer,
    /// Decimal numbers of the form `digits.digits`.
    Float,
    /// Everything else, including columns with no evidence at all.
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "Integer"),
            ColumnType::Float => write!(f, "Float"),
            ColumnType::String => write!(f, "String"),
        }
    }
}
