//! Ciphermark CLI - structural attestation for tabular datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ciphermark=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Attest { file, demo, output } => {
            commands::attest::run(file, demo, output, cli.verbose)
        }

        Commands::Submit {
            file,
            demo,
            address,
            gateway,
            endpoint,
            timeout,
        } => commands::submit::run(file, demo, address, gateway, endpoint, timeout, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
