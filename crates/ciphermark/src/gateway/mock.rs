//! Mock gateway for tests and the demo path.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::error::{CiphermarkError, Result};

use super::{SubmissionGateway, SubmissionRequest};

/// What the mock does when invoked.
#[derive(Debug, Clone)]
enum Behavior {
    /// Accept every submission with a fixed reference id.
    Accept(String),
    /// Reject every submission with a fixed cause.
    Reject(String),
    /// Reject the first submission, accept the rest.
    RejectFirst { cause: String, then_id: String },
    /// Sleep for the duration, then accept.
    Stall(Duration),
}

/// In-process gateway with scriptable behavior.
///
/// Clones share the request log, so a test can keep a probe handle after
/// handing the gateway to a pipeline.
#[derive(Clone)]
pub struct MockGateway {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<SubmissionRequest>>>,
}

impl MockGateway {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Gateway that accepts every submission with a fixed reference id.
    pub fn accepting(reference_id: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Accept(reference_id.into()))
    }

    /// Gateway that rejects every submission.
    pub fn rejecting(cause: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reject(cause.into()))
    }

    /// Gateway that rejects the first submission and accepts the rest.
    pub fn rejecting_then_accepting(
        cause: impl Into<String>,
        reference_id: impl Into<String>,
    ) -> Self {
        Self::with_behavior(Behavior::RejectFirst {
            cause: cause.into(),
            then_id: reference_id.into(),
        })
    }

    /// Gateway that stalls for `delay` before accepting.
    pub fn stalling(delay: Duration) -> Self {
        Self::with_behavior(Behavior::Stall(delay))
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("mock request log poisoned").len()
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::accepting("tx_submitted_mock")
    }
}

impl SubmissionGateway for MockGateway {
    fn request_transaction(&self, request: &SubmissionRequest) -> Result<String> {
        let seen = {
            let mut requests = self.requests.lock().expect("mock request log poisoned");
            requests.push(request.clone());
            requests.len()
        };

        match &self.behavior {
            Behavior::Accept(id) => Ok(id.clone()),
            Behavior::Reject(cause) => Err(CiphermarkError::Submission(cause.clone())),
            Behavior::RejectFirst { cause, then_id } => {
                if seen == 1 {
                    Err(CiphermarkError::Submission(cause.clone()))
                } else {
                    Ok(then_id.clone())
                }
            }
            Behavior::Stall(delay) => {
                thread::sleep(*delay);
                Ok("tx_submitted_mock".to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
