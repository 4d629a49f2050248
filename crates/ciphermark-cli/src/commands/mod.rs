//! CLI command implementations.

pub mod attest;
pub mod submit;

use std::fs;
use std::path::Path;

use ciphermark::SAMPLE_CSV;

/// Resolve the input source: a file path or the bundled demo dataset.
///
/// Returns a display label alongside the raw content.
pub(crate) fn load_input(
    file: Option<&Path>,
    demo: bool,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    if demo {
        return Ok(("sample dataset".to_string(), SAMPLE_CSV.to_string()));
    }

    let path = file.ok_or("no input file provided")?;
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let content = fs::read_to_string(path)?;
    Ok((path.display().to_string(), content))
}
