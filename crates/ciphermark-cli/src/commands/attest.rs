//! Attest command - build a proof object for a CSV file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use ciphermark::{AttestationPipeline, MockGateway};

pub fn run(
    file: Option<PathBuf>,
    demo: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (label, content) = super::load_input(file.as_deref(), demo)?;

    println!("{} {}", "Attesting".cyan().bold(), label.white());

    let pipeline = AttestationPipeline::new(MockGateway::default());
    let proof = pipeline.start(&content)?;

    if verbose {
        println!();
        println!("{}", "Column types:".yellow().bold());
        for (i, ty) in proof.schema.column_types.iter().enumerate() {
            println!("  column {:2}  {}", i + 1, ty);
        }
        println!();
    }

    println!(
        "Columns:    {}",
        proof.schema.column_count.to_string().white().bold()
    );
    println!(
        "Rows:       {}",
        proof.schema.row_count.to_string().white().bold()
    );
    println!("Hash:       {}", proof.schema.content_hash.white());
    println!("Commitment: {}", proof.commitment.white());

    // Determine output path
    let output_path = output.unwrap_or_else(|| match &file {
        Some(f) => {
            let mut p = f.clone();
            let stem = p.file_stem().unwrap_or_default().to_string_lossy().into_owned();
            p.set_file_name(format!("{}.proof.json", stem));
            p
        }
        None => PathBuf::from("sample.proof.json"),
    });

    fs::write(&output_path, proof.to_json()?)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    let submit_hint = match &file {
        Some(f) => format!("ciphermark submit {} --address <address>", f.display()),
        None => "ciphermark submit --demo --address <address>".to_string(),
    };
    println!(
        "Run {} to relay it to the verification network",
        submit_hint.cyan()
    );

    Ok(())
}
