//! Prove command implementation

use crate::cli::commands::parse_key;
use crate::cli::context::CliContext;
use crate::core::hash::sha256;
use crate::proofs::InclusionProof;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the prove command
pub fn execute(key: String, index: usize, output: Option<PathBuf>) -> Result<()> {
    let key = parse_key(&key)?;
    let service = CliContext::current().file_service();

    let (content, name) = service
        .get_file(&key, index)
        .with_context(|| format!("Failed to read file {} under key {}", index, key))?;
    let siblings = service.get_proof(&key, index)?;

    let proof = InclusionProof::new(key, index, sha256(&content), siblings).with_name(name);
    let json = proof.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !CliContext::is_quiet() {
                println!(
                    "{} Proof for file {} written to {}",
                    "✓".green(),
                    index,
                    path.display().to_string().cyan()
                );
            }
        },
        None => println!("{}", json),
    }

    Ok(())
}
