//! The proof object produced by a pipeline run.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::DatasetSchema;

/// Immutable attestation bundle: the commitment, the attested schema, and
/// the public facts a verifier is allowed to see.
///
/// Constructed once per successful pipeline run and never modified
/// afterwards; the pipeline owns the bundle until it is handed to the
/// submission gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofObject {
    /// Tagged schema commitment.
    pub commitment: String,
    /// The attested structural schema.
    pub schema: DatasetSchema,
    /// When the proof was constructed.
    pub created_at: DateTime<Utc>,
    /// Human-readable one-line description.
    pub summary: String,
    /// Publicly revealed facts, in attestation order.
    pub public_facts: IndexMap<String, String>,
}

impl ProofObject {
    /// Build a proof object for a schema and its commitment.
    pub(crate) fn new(commitment: String, schema: DatasetSchema) -> Self {
        let summary = format!(
            "Schema attestation generated for {} columns, {} rows",
            schema.column_count, schema.row_count
        );

        let mut public_facts = IndexMap::new();
        public_facts.insert("column_count".to_string(), schema.column_count.to_string());
        public_facts.insert("row_count".to_string(), schema.row_count.to_string());
        public_facts.insert("content_hash".to_string(), schema.content_hash.clone());

        Self {
            commitment,
            schema,
            created_at: Utc::now(),
            summary,
            public_facts,
        }
    }

    /// Render the proof as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
