//! Per-column type inference.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::RawTable;
use crate::schema::ColumnType;

// ASCII digit classes only: the ledger program recognizes no wider set, so
// Unicode digits, signs, and exponents all land in the "other" bucket.
static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").unwrap());

/// Infer a type for every header column of `table`.
///
/// A cell that is absent (short row) or empty contributes no evidence. A
/// single value matching neither numeric pattern forces the whole column to
/// `String`, even if every other value is numeric; a column with no
/// evidence at all is `String` as well.
pub fn infer_types(table: &RawTable) -> Vec<ColumnType> {
    (0..table.column_count())
        .map(|col| classify_column(table, col))
        .collect()
}

fn classify_column(table: &RawTable, col: usize) -> ColumnType {
    let mut saw_integer = false;
    let mut saw_float = false;
    let mut saw_other = false;

    for value in table.column_values(col) {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };

        if INTEGER_PATTERN.is_match(value) {
            saw_integer = true;
        } else if FLOAT_PATTERN.is_match(value) {
            saw_float = true;
        } else {
            saw_other = true;
        }
    }

    if saw_other {
        ColumnType::String
    } else if saw_float {
        ColumnType::Float
    } else if saw_integer {
        ColumnType::Integer
    } else {
        ColumnType::String
    }
}
