//! Submit command - attest a CSV file and relay the proof to the network.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;

use ciphermark::{AttestationPipeline, MockGateway, PipelineConfig, RpcGateway};

use crate::cli::GatewayChoice;

pub fn run(
    file: Option<PathBuf>,
    demo: bool,
    address: String,
    gateway: GatewayChoice,
    endpoint: Option<String>,
    timeout: u64,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (label, content) = super::load_input(file.as_deref(), demo)?;

    let config = PipelineConfig {
        submit_timeout: Duration::from_secs(timeout),
        ..PipelineConfig::default()
    };

    let pipeline = match gateway {
        GatewayChoice::Mock => AttestationPipeline::with_config(MockGateway::default(), config),
        GatewayChoice::Rpc => {
            let endpoint = endpoint.ok_or("--endpoint is required with --gateway rpc")?;
            AttestationPipeline::with_config(RpcGateway::new(endpoint)?, config)
        }
    };

    println!("{} {}", "Attesting".cyan().bold(), label.white());
    let proof = pipeline.start(&content)?;
    println!("Commitment: {}", proof.commitment.white());

    if verbose {
        println!();
        println!("{}", proof.to_json()?);
        println!();
    }

    println!("{}", "Submitting proof...".cyan().bold());
    let reference_id = pipeline.submit(&address)?;

    println!();
    println!("{} {}", "Accepted".green().bold(), reference_id.white());

    Ok(())
}
