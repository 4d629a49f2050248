//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ciphermark: structural attestation for tabular datasets
#[derive(Parser)]
#[command(name = "ciphermark")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attest a CSV file and write the proof object
    Attest {
        /// Path to the CSV file (omit with --demo)
        #[arg(value_name = "FILE", required_unless_present = "demo")]
        file: Option<PathBuf>,

        /// Use the bundled sample dataset instead of a file
        #[arg(long)]
        demo: bool,

        /// Output path for the proof JSON (default: <file>.proof.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Attest a CSV file and submit the proof to the verification network
    Submit {
        /// Path to the CSV file (omit with --demo)
        #[arg(value_name = "FILE", required_unless_present = "demo")]
        file: Option<PathBuf>,

        /// Use the bundled sample dataset instead of a file
        #[arg(long)]
        demo: bool,

        /// Caller identity (ledger address) the submission is made as
        #[arg(short, long)]
        address: String,

        /// Gateway to submit through
        #[arg(long, default_value = "mock")]
        gateway: GatewayChoice,

        /// RPC endpoint (required for --gateway rpc)
        #[arg(long)]
        endpoint: Option<String>,

        /// Seconds to wait for the gateway before giving up
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

/// Gateway choice for submissions
#[derive(Clone, Debug, Default)]
pub enum GatewayChoice {
    /// In-process mock gateway that accepts everything
    #[default]
    Mock,
    /// JSON RPC gateway (requires --endpoint)
    Rpc,
}

impl std::str::FromStr for GatewayChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "test" => Ok(GatewayChoice::Mock),
            "rpc" | "ledger" => Ok(GatewayChoice::Rpc),
            _ => Err(format!("Unknown gateway: {}. Use mock or rpc.", s)),
        }
    }
}

impl std::fmt::Display for GatewayChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayChoice::Mock => write!(f, "mock"),
            GatewayChoice::Rpc => write!(f, "rpc"),
        }
    }
}
