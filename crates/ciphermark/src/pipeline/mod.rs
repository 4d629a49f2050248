//! Staged attestation pipeline.

use std::fmt;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::commitment;
use crate::error::{CiphermarkError, Result};
use crate::gateway::{self, NetworkTarget, SubmissionGateway, SubmissionRequest};
use crate::input::Parser;
use crate::proof::ProofObject;
use crate::schema::DatasetSchema;

/// Default time to wait for the submission gateway before forcing the
/// pipeline back to idle.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pipeline lifecycle state.
///
/// Idle is the initial state, the state a finished-but-unsubmitted run
/// rests in, and the recovery state after any failure. Complete is terminal
/// for a run; starting a new run from it behaves like starting from idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing in flight; a proof may be held ready for submission.
    Idle,
    /// Parsing input and extracting the schema.
    Parsing,
    /// Computing the commitment and building the proof object.
    Generating,
    /// Waiting on the submission gateway.
    Submitting,
    /// Submission accepted; reference id held.
    Complete,
}

impl PipelineState {
    /// True while a run holds the pipeline.
    fn is_active(&self) -> bool {
        matches!(
            self,
            PipelineState::Parsing | PipelineState::Generating | PipelineState::Submitting
        )
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Parsing => write!(f, "parsing"),
            PipelineState::Generating => write!(f, "generating"),
            PipelineState::Submitting => write!(f, "submitting"),
            PipelineState::Complete => write!(f, "complete"),
        }
    }
}

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target network for submissions.
    pub target: NetworkTarget,
    /// How long to wait for the gateway before abandoning a submission.
    pub submit_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target: NetworkTarget::default(),
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

/// Progress handler invoked synchronously at each generation checkpoint.
type ProgressHandler = Box<dyn Fn(f64) + Send + Sync>;

/// State behind the lock: the machine state plus the single proof and
/// reference-id slot.
#[derive(Default)]
struct Slot {
    state: PipelineState,
    proof: Option<ProofObject>,
    reference_id: Option<String>,
}

/// The staged attestation pipeline.
///
/// Drives parser, inferencer, and commitment generator through the
/// Parsing and Generating stages, then hands the finished proof to the
/// submission gateway. At most one run is active at a time; the state is
/// the sole concurrency guard and a busy pipeline rejects new work instead
/// of queueing it.
pub struct AttestationPipeline {
    config: PipelineConfig,
    parser: Parser,
    gateway: Arc<dyn SubmissionGateway>,
    progress: Option<ProgressHandler>,
    slot: Mutex<Slot>,
}

impl AttestationPipeline {
    /// Create a pipeline with default configuration.
    pub fn new(gateway: impl SubmissionGateway + 'static) -> Self {
        Self::with_config(gateway, PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(gateway: impl SubmissionGateway + 'static, config: PipelineConfig) -> Self {
        Self {
            config,
            parser: Parser::new(),
            gateway: Arc::new(gateway),
            progress: None,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Register a progress handler.
    ///
    /// Must be called before the run starts. Each checkpoint of a
    /// successful generating stage is delivered to the handler exactly
    /// once, in increasing order, ending with 1.0.
    pub fn with_progress(mut self, handler: impl Fn(f64) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(handler));
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.lock().state
    }

    /// Proof held from the last successful run, if any.
    pub fn proof(&self) -> Option<ProofObject> {
        self.lock().proof.clone()
    }

    /// Reference id from the last accepted submission, if any.
    pub fn reference_id(&self) -> Option<String> {
        self.lock().reference_id.clone()
    }

    /// Run the attestation stages over raw delimited text.
    ///
    /// On success the pipeline returns to idle holding the new proof,
    /// ready for submission, and a copy is returned. On failure the
    /// pipeline returns to idle with nothing retained from this run.
    pub fn start(&self, raw_text: &str) -> Result<ProofObject> {
        self.begin_run()?;

        match self.run_stages(raw_text) {
            Ok(proof) => {
                let mut slot = self.lock();
                slot.proof = Some(proof.clone());
                slot.state = PipelineState::Idle;
                Ok(proof)
            }
            Err(e) => {
                self.lock().state = PipelineState::Idle;
                Err(e)
            }
        }
    }

    /// Submit the held proof to the verification network as `identity`.
    ///
    /// Fails fast if no proof is held, `identity` is blank, or another
    /// transition is active. On gateway failure or timeout the pipeline
    /// returns to idle with the proof retained, so the identical commitment
    /// can be resubmitted without regeneration. Retrying is the caller's
    /// decision; the pipeline never retries on its own.
    pub fn submit(&self, identity: &str) -> Result<String> {
        let request = self.begin_submit(identity)?;
        let result = self.call_gateway(request);

        let mut slot = self.lock();
        match result {
            Ok(reference_id) => {
                info!(reference_id = %reference_id, "submission accepted");
                slot.reference_id = Some(reference_id.clone());
                slot.state = PipelineState::Complete;
                Ok(reference_id)
            }
            Err(e) => {
                warn!(error = %e, "submission failed; proof retained");
                slot.state = PipelineState::Idle;
                Err(e)
            }
        }
    }

    /// Atomically claim the pipeline for a new run.
    ///
    /// A new run always discards the previous result, submitted or not; no
    /// history is retained across runs.
    fn begin_run(&self) -> Result<()> {
        let mut slot = self.lock();
        if slot.state.is_active() {
            return Err(CiphermarkError::NotReady(format!(
                "a run is already {}",
                slot.state
            )));
        }

        slot.proof = None;
        slot.reference_id = None;
        slot.state = PipelineState::Parsing;
        Ok(())
    }

    /// Atomically claim the pipeline for a submission and prepare the
    /// request from the held proof.
    fn begin_submit(&self, identity: &str) -> Result<SubmissionRequest> {
        let mut slot = self.lock();
        match slot.state {
            PipelineState::Idle => {}
            PipelineState::Complete => {
                return Err(CiphermarkError::NotReady(
                    "proof already submitted; start a new run".to_string(),
                ));
            }
            active => {
                return Err(CiphermarkError::NotReady(format!(
                    "a run is already {}",
                    active
                )));
            }
        }

        if identity.trim().is_empty() {
            return Err(CiphermarkError::NotReady(
                "no caller identity provided".to_string(),
            ));
        }

        let proof = slot.proof.as_ref().ok_or_else(|| {
            CiphermarkError::NotReady("no proof held; run the pipeline first".to_string())
        })?;

        let request = SubmissionRequest {
            address: identity.to_string(),
            target: self.config.target.clone(),
            inputs: gateway::encode_inputs(&proof.schema)?,
        };

        slot.state = PipelineState::Submitting;
        Ok(request)
    }

    /// The Parsing and Generating stages.
    fn run_stages(&self, raw_text: &str) -> Result<ProofObject> {
        debug!(bytes = raw_text.len(), "parsing input");
        let table = self.parser.parse(raw_text)?;
        let schema = DatasetSchema::extract(raw_text, &table);
        info!(
            columns = schema.column_count,
            rows = schema.row_count,
            "schema extracted"
        );

        schema.validate()?;
        self.lock().state = PipelineState::Generating;

        // The checkpoint ladder is part of the caller contract even though
        // generation itself is cheap: each value is delivered once, in
        // order, and 1.0 always lands before the state leaves Generating.
        self.report(0.1);
        self.report(0.25);
        let commitment = commitment::commit(&schema);
        info!(commitment = %commitment, "commitment generated");
        self.report(0.5);
        self.report(0.75);
        let proof = ProofObject::new(commitment, schema);
        self.report(0.9);
        self.report(1.0);

        Ok(proof)
    }

    /// Invoke the gateway on a worker thread, bounded by the configured
    /// timeout.
    ///
    /// If the transport never resolves, the in-flight request is abandoned
    /// and the detached worker's late result is dropped with the channel.
    fn call_gateway(&self, request: SubmissionRequest) -> Result<String> {
        let gateway = Arc::clone(&self.gateway);
        let (tx, rx) = mpsc::channel();

        debug!(gateway = gateway.name(), "submitting proof");
        thread::spawn(move || {
            let result = gateway.request_transaction(&request);
            // The receiver may already be gone if the deadline passed.
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.config.submit_timeout) {
            Ok(result) => result,
            Err(_) => Err(CiphermarkError::Submission(format!(
                "gateway did not respond within {:?}",
                self.config.submit_timeout
            ))),
        }
    }

    fn report(&self, checkpoint: f64) {
        if let Some(handler) = &self.progress {
            handler(checkpoint);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().expect("pipeline state lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGateway;

    #[test]
    fn test_successful_run_rests_idle_with_proof() {
        let pipeline = AttestationPipeline::new(MockGateway::default());
        let proof = pipeline.start("a,b\n1,2.5\nx,3.5").unwrap();

        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(pipeline.proof().unwrap(), proof);
        assert!(pipeline.reference_id().is_none());
    }

    #[test]
    fn test_failed_parse_leaves_nothing_held() {
        let pipeline = AttestationPipeline::new(MockGateway::default());

        assert!(pipeline.start("   ").is_err());
        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert!(pipeline.proof().is_none());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(PipelineState::Idle.to_string(), "idle");
        assert_eq!(PipelineState::Generating.to_string(), "generating");
        assert_eq!(PipelineState::Submitting.to_string(), "submitting");
    }
}
