//! State machine tests for the attestation pipeline.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use ciphermark::{
    AttestationPipeline, CiphermarkError, MockGateway, PipelineConfig, PipelineState,
};

const INPUT: &str = "Name,Age\nAlice,30\nBob,25";

// =============================================================================
// Progress reporting
// =============================================================================

#[test]
fn test_checkpoints_delivered_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let pipeline = AttestationPipeline::new(MockGateway::default())
        .with_progress(move |p| sink.lock().unwrap().push(p));
    pipeline.start(INPUT).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![0.1, 0.25, 0.5, 0.75, 0.9, 1.0]);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.iter().filter(|p| **p == 1.0).count(), 1);
}

#[test]
fn test_no_checkpoints_before_generating() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let pipeline = AttestationPipeline::new(MockGateway::default())
        .with_progress(move |p| sink.lock().unwrap().push(p));

    // Parse failure and bounds failure both happen before Generating.
    assert!(pipeline.start("").is_err());
    assert!(pipeline.start("a,b,c").is_err());

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_checkpoints_reset_per_run() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let pipeline = AttestationPipeline::new(MockGateway::default())
        .with_progress(move |p| sink.lock().unwrap().push(p));
    pipeline.start(INPUT).unwrap();
    pipeline.start(INPUT).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 12);
    assert_eq!(seen.iter().filter(|p| **p == 1.0).count(), 2);
}

// =============================================================================
// Concurrency guard
// =============================================================================

#[test]
fn test_busy_pipeline_rejects_second_start() {
    let pipeline = Arc::new(AttestationPipeline::new(MockGateway::stalling(
        Duration::from_millis(300),
    )));
    pipeline.start(INPUT).unwrap();
    let first_commitment = pipeline.proof().unwrap().commitment;

    let submitter = {
        let pipeline = Arc::clone(&pipeline);
        thread::spawn(move || pipeline.submit("aleo1caller"))
    };
    thread::sleep(Duration::from_millis(100));

    // The submission is in flight; a second run must be rejected without
    // queueing and without disturbing the in-flight result.
    assert_eq!(pipeline.state(), PipelineState::Submitting);
    let err = pipeline.start(INPUT).unwrap_err();
    assert!(matches!(err, CiphermarkError::NotReady(_)));

    let reference_id = submitter
        .join()
        .unwrap()
        .expect("in-flight submission should still succeed");
    assert!(!reference_id.is_empty());
    assert_eq!(pipeline.state(), PipelineState::Complete);
    assert_eq!(pipeline.proof().unwrap().commitment, first_commitment);
}

#[test]
fn test_second_submit_while_submitting_rejected() {
    let pipeline = Arc::new(AttestationPipeline::new(MockGateway::stalling(
        Duration::from_millis(300),
    )));
    pipeline.start(INPUT).unwrap();

    let submitter = {
        let pipeline = Arc::clone(&pipeline);
        thread::spawn(move || pipeline.submit("aleo1caller"))
    };
    thread::sleep(Duration::from_millis(100));

    let err = pipeline.submit("aleo1caller").unwrap_err();
    assert!(matches!(err, CiphermarkError::NotReady(_)));

    submitter.join().unwrap().unwrap();
}

// =============================================================================
// Submission preconditions
// =============================================================================

#[test]
fn test_submit_without_proof() {
    let pipeline = AttestationPipeline::new(MockGateway::default());
    let err = pipeline.submit("aleo1caller").unwrap_err();
    assert!(matches!(err, CiphermarkError::NotReady(_)));
}

#[test]
fn test_submit_with_blank_identity() {
    let pipeline = AttestationPipeline::new(MockGateway::default());
    pipeline.start(INPUT).unwrap();

    let err = pipeline.submit("  ").unwrap_err();
    assert!(matches!(err, CiphermarkError::NotReady(_)));

    // Nothing was consumed; a proper submission still works.
    assert!(pipeline.proof().is_some());
    assert!(pipeline.submit("aleo1caller").is_ok());
}

#[test]
fn test_submit_twice_requires_new_run() {
    let pipeline = AttestationPipeline::new(MockGateway::default());
    pipeline.start(INPUT).unwrap();
    pipeline.submit("aleo1caller").unwrap();

    let err = pipeline.submit("aleo1caller").unwrap_err();
    assert!(matches!(err, CiphermarkError::NotReady(_)));
}

// =============================================================================
// Failure recovery and resubmission
// =============================================================================

#[test]
fn test_resubmission_reuses_commitment() {
    let gateway = MockGateway::rejecting_then_accepting("ledger unreachable", "tx_retry_ok");
    let probe = gateway.clone();
    let pipeline = AttestationPipeline::new(gateway);

    pipeline.start(INPUT).unwrap();
    let commitment = pipeline.proof().unwrap().commitment;

    let err = pipeline.submit("aleo1caller").unwrap_err();
    assert!(matches!(err, CiphermarkError::Submission(_)));
    assert_eq!(pipeline.state(), PipelineState::Idle);

    // The proof survived the failure; the retry carries identical facts.
    assert_eq!(pipeline.proof().unwrap().commitment, commitment);
    let reference_id = pipeline.submit("aleo1caller").unwrap();
    assert_eq!(reference_id, "tx_retry_ok");

    let requests = probe.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].inputs, requests[1].inputs);
    assert_eq!(requests[0].address, requests[1].address);
}

#[test]
fn test_submit_timeout_forces_idle() {
    let config = PipelineConfig {
        submit_timeout: Duration::from_millis(50),
        ..PipelineConfig::default()
    };
    let pipeline = AttestationPipeline::with_config(
        MockGateway::stalling(Duration::from_millis(400)),
        config,
    );
    pipeline.start(INPUT).unwrap();

    let err = pipeline.submit("aleo1caller").unwrap_err();
    assert!(matches!(err, CiphermarkError::Submission(_)));
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(pipeline.proof().is_some());
}

#[test]
fn test_failed_run_returns_to_idle() {
    let pipeline = AttestationPipeline::new(MockGateway::default());
    assert!(pipeline.start("a,b,c").is_err());
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert!(pipeline.proof().is_none());
}

// =============================================================================
// Run replacement
// =============================================================================

#[test]
fn test_new_run_discards_previous_result() {
    let pipeline = AttestationPipeline::new(MockGateway::default());

    pipeline.start(INPUT).unwrap();
    pipeline.submit("aleo1caller").unwrap();
    assert_eq!(pipeline.state(), PipelineState::Complete);

    let proof = pipeline.start("x,y\n1,2").unwrap();
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert_eq!(pipeline.proof().unwrap().commitment, proof.commitment);
    assert!(pipeline.reference_id().is_none());
}
