//! Error types for the Ciphermark library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Ciphermark operations.
///
/// Every variant is recoverable: a failed pipeline run returns the state
/// machine to idle and surfaces one of these to the caller.
#[derive(Debug, Error)]
pub enum CiphermarkError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input contained no parsable rows.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A schema field is outside the attestable range.
    #[error("Schema bounds violated: {field} is {value}, allowed range is {min}..={max}")]
    SchemaBounds {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// The pipeline cannot accept the requested transition.
    #[error("Not ready: {0}")]
    NotReady(String),

    /// The submission gateway failed or did not respond.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Ciphermark operations.
pub type Result<T> = std::result::Result<T, CiphermarkError>;
