//! HTTP RPC gateway implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{CiphermarkError, Result};

use super::{SubmissionGateway, SubmissionRequest};

/// Default transport timeout for a single RPC call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway that posts submissions to a ledger RPC endpoint as JSON.
///
/// Reference implementation of the transport boundary; it knows nothing
/// about proofs beyond the prepared [`SubmissionRequest`].
pub struct RpcGateway {
    client: Client,
    endpoint: String,
}

impl RpcGateway {
    /// Create a gateway for an RPC endpoint.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a gateway with a custom transport timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            CiphermarkError::Submission(format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Successful RPC response.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    transaction_id: String,
}

/// Wire body the ledger RPC expects.
fn request_body(request: &SubmissionRequest) -> serde_json::Value {
    json!({
        "address": request.address,
        "chainId": request.target.chain_id,
        "transitions": [{
            "program": request.target.program,
            "functionName": request.target.function,
            "inputs": request.inputs,
        }],
        "fee": request.target.fee,
        "feePrivate": false,
    })
}

impl SubmissionGateway for RpcGateway {
    fn request_transaction(&self, request: &SubmissionRequest) -> Result<String> {
        let body = request_body(request);

        debug!(
            endpoint = %self.endpoint,
            program = %request.target.program,
            "posting submission"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| CiphermarkError::Submission(format!("gateway unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(CiphermarkError::Submission(format!(
                "gateway rejected submission ({}): {}",
                status, error_text
            )));
        }

        let parsed: RpcResponse = response.json().map_err(|e| {
            CiphermarkError::Submission(format!("malformed gateway response: {}", e))
        })?;

        Ok(parsed.transaction_id)
    }

    fn name(&self) -> &str {
        "rpc"
    }
}
