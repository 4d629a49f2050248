//! Ciphermark: structural attestation for tabular datasets.
//!
//! Ciphermark lets a data owner attest to the structure of a CSV dataset
//! (column count, inferred column types, row count, content fingerprint)
//! without revealing its contents, then package the attestation as an
//! immutable proof object and relay it to an external verification network.
//!
//! The commitment is a deterministic rolling-hash fingerprint kept
//! bit-compatible with previously recorded attestations. It is not a
//! cryptographic zero-knowledge proof and has no soundness property; see
//! the [`commitment`] module.
//!
//! # Example
//!
//! ```
//! use ciphermark::{AttestationPipeline, MockGateway};
//!
//! let pipeline = AttestationPipeline::new(MockGateway::default());
//! let proof = pipeline.start("Name,Age\nAlice,30\nBob,25").unwrap();
//!
//! assert_eq!(proof.schema.column_count, 2);
//! assert!(proof.commitment.starts_with("zk_commitment_"));
//!
//! let reference_id = pipeline.submit("aleo1owner").unwrap();
//! assert!(!reference_id.is_empty());
//! ```

pub mod commitment;
pub mod error;
pub mod gateway;
pub mod inference;
pub mod input;
pub mod pipeline;
pub mod schema;

mod proof;

pub use error::{CiphermarkError, Result};
pub use gateway::{
    MockGateway, NetworkTarget, RpcGateway, SubmissionGateway, SubmissionRequest,
};
pub use input::{Parser, RawTable};
pub use pipeline::{AttestationPipeline, PipelineConfig, PipelineState};
pub use proof::ProofObject;
pub use schema::{ColumnType, DatasetSchema, MAX_COLUMNS, MAX_ROWS};

/// Sample employee dataset for the demo path.
///
/// Ten data rows, five columns, no sensitive content; attesting it shows a
/// buyer the shape of the data without revealing a single cell.
pub const SAMPLE_CSV: &str = "\
Name,Age,Department,Salary,Years_Experience
Alice Johnson,28,Engineering,95000,5
Bob Smith,35,Marketing,78000,8
Carol White,42,Engineering,125000,15
David Brown,31,Sales,82000,6
Emma Davis,29,Engineering,98000,4
Frank Wilson,38,Marketing,88000,10
Grace Lee,33,Sales,91000,7
Henry Taylor,45,Engineering,135000,18
Iris Martinez,27,Marketing,72000,3
Jack Anderson,36,Sales,95000,9";
