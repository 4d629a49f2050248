//! Fixed-delimiter tabular parser.

use std::fs;
use std::path::Path;

use crate::error::{CiphermarkError, Result};

use super::table::RawTable;

/// The only delimiter the attestation contract recognizes.
const DELIMITER: char = ',';

/// Parses comma-delimited text into a [`RawTable`].
///
/// There is no quoting or escape support: a literal comma inside a cell is
/// always a column boundary. The verification network recomputes
/// commitments over the same naive split, so the parser must not be smarter
/// than the contract.
#[derive(Debug, Clone, Default)]
pub struct Parser;

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse raw delimited text.
    ///
    /// The text is trimmed as a whole first; each remaining line is split
    /// on commas and each cell trimmed of surrounding whitespace (which
    /// also strips the `\r` of CRLF line endings). The first line is the
    /// header; short data rows are tolerated.
    pub fn parse(&self, raw_text: &str) -> Result<RawTable> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Err(CiphermarkError::EmptyInput(
                "no rows after trimming".to_string(),
            ));
        }

        let mut lines = trimmed.split('\n');
        let header = match lines.next() {
            Some(line) => split_line(line),
            None => {
                return Err(CiphermarkError::EmptyInput(
                    "no rows after trimming".to_string(),
                ));
            }
        };
        let rows: Vec<Vec<String>> = lines.map(split_line).collect();

        Ok(RawTable::new(header, rows))
    }

    /// Read a UTF-8 file and parse it.
    ///
    /// Returns the raw text alongside the table: the content fingerprint is
    /// computed over the exact text that was read, not a normalized form.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(String, RawTable)> {
        let path = path.as_ref();
        let raw_text = fs::read_to_string(path).map_err(|e| CiphermarkError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let table = self.parse(&raw_text)?;
        Ok((raw_text, table))
    }
}

fn split_line(line: &str) -> Vec<String> {
    line.split(DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = Parser::new().parse("name,age\nAlice,30\nBob,25").unwrap();
        assert_eq!(table.header, vec!["name", "age"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 0), Some("Alice"));
        assert_eq!(table.cell(1, 1), Some("25"));
    }

    #[test]
    fn test_cells_are_trimmed() {
        let table = Parser::new().parse("a , b\n 1 ,2 ").unwrap();
        assert_eq!(table.header, vec!["a", "b"]);
        assert_eq!(table.cell(0, 0), Some("1"));
        assert_eq!(table.cell(0, 1), Some("2"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = Parser::new().parse("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 1), Some("2"));
    }

    #[test]
    fn test_short_rows_tolerated() {
        let table = Parser::new().parse("a,b,c\n1,2\n3").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(1, 0), Some("3"));
    }

    #[test]
    fn test_quoted_comma_is_a_boundary() {
        // No quoting support: the quote characters stay in the cells.
        let table = Parser::new().parse("a,b\n\"x,y\",2").unwrap();
        assert_eq!(table.cell(0, 0), Some("\"x"));
        assert_eq!(table.cell(0, 1), Some("y\""));
    }

    #[test]
    fn test_header_only_has_zero_data_rows() {
        let table = Parser::new().parse("a,b,c").unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            Parser::new().parse(""),
            Err(CiphermarkError::EmptyInput(_))
        ));
        assert!(matches!(
            Parser::new().parse("   \n \t \n"),
            Err(CiphermarkError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_interior_blank_line_counts_as_a_row() {
        // The naive split keeps a blank interior line as a one-empty-cell
        // row; the commitment contract counts it.
        let table = Parser::new().parse("a,b\n1,2\n\n3,4").unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(1, 0), Some(""));
        assert_eq!(table.cell(1, 1), None);
    }
}
