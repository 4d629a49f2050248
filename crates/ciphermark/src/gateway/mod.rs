//! Submission gateway boundary.
//!
//! The pipeline hands a finished proof to the verification network through
//! this narrow contract. Everything about the transport itself (key
//! management, wallet adapters, RPC details) lives behind it.

mod mock;
mod rpc;

pub use mock::MockGateway;
pub use rpc::RpcGateway;

use serde::{Deserialize, Serialize};

use crate::error::{CiphermarkError, Result};
use crate::schema::DatasetSchema;

/// Ledger program and network a proof is submitted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTarget {
    /// Chain identifier.
    pub chain_id: String,
    /// On-chain program receiving the attestation.
    pub program: String,
    /// Program function to invoke.
    pub function: String,
    /// Flat fee in microcredits.
    pub fee: u64,
}

impl Default for NetworkTarget {
    fn default() -> Self {
        Self {
            chain_id: "testnet3".to_string(),
            program: "data_attestation.aleo".to_string(),
            function: "attest_schema".to_string(),
            fee: 100_000,
        }
    }
}

/// A fully prepared submission: encoded public facts plus the caller
/// identity and target selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Caller identity (opaque ledger address).
    pub address: String,
    /// Target network and program.
    pub target: NetworkTarget,
    /// Encoded transition inputs.
    pub inputs: Vec<String>,
}

/// Encode the public facts of a schema as ledger transition inputs.
///
/// Column and row counts travel as `u32` literals; the content hash is
/// reinterpreted as a decimal field element.
pub fn encode_inputs(schema: &DatasetSchema) -> Result<Vec<String>> {
    let field = u64::from_str_radix(&schema.content_hash, 16).map_err(|e| {
        CiphermarkError::Submission(format!(
            "malformed content hash '{}': {}",
            schema.content_hash, e
        ))
    })?;

    Ok(vec![
        format!("{}u32", schema.column_count),
        format!("{}u32", schema.row_count),
        format!("{}field", field),
    ])
}

/// Transport capability for relaying an attestation to the ledger.
///
/// Implementations must be thread-safe (Send + Sync): the pipeline invokes
/// them from a worker thread so a stalled transport can be abandoned at the
/// submission deadline.
pub trait SubmissionGateway: Send + Sync {
    /// Relay the request; returns the ledger transaction id on success.
    ///
    /// Every failure mode (unreachable network, rejected identity,
    /// malformed request) surfaces as a `Submission` error with a
    /// human-readable cause.
    fn request_transaction(&self, request: &SubmissionRequest) -> Result<String>;

    /// Name of this gateway (for logging).
    fn name(&self) -> &str;
}
