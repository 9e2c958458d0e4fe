//! Verify command implementation

use crate::cli::context::CliContext;
use crate::core::{hash::hash_file, types::Hash};
use crate::proofs::InclusionProof;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the verify command
pub fn execute(
    proof: PathBuf,
    file: Option<PathBuf>,
    root: Option<String>,
    json: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(&proof)
        .with_context(|| format!("Failed to read proof {}", proof.display()))?;
    let proof = InclusionProof::from_json(&content)?;

    let root = match root {
        Some(hex) => Hash::from_hex(&hex).context("Invalid root hash")?,
        None => CliContext::current()
            .root_registry()
            .load(&proof.key)
            .context("No trusted root given and none recorded locally")?,
    };

    let leaf_matches = match &file {
        Some(path) => hash_file(path)
            .with_context(|| format!("Failed to hash {}", path.display()))?
            == proof.leaf,
        None => true,
    };
    let valid = leaf_matches && proof.verify(&root);

    if json {
        println!(
            "{}",
            json!({
                "key": proof.key,
                "index": proof.index,
                "root": root,
                "leaf_matches": leaf_matches,
                "valid": valid,
            })
        );
    } else if !CliContext::is_quiet() {
        println!("{}: {}", "Store Key".bold(), proof.key);
        println!("{}: {}", "Index".bold(), proof.index);
        println!("{}: {}", "Root".bold(), root.to_hex().dimmed());
        if CliContext::is_verbose() {
            for (level, sibling) in proof.siblings.iter().enumerate() {
                println!("  {} {}", format!("[{}]", level).dimmed(), sibling);
            }
        }
    }

    if !leaf_matches {
        bail!("File contents do not match the proven leaf");
    }
    if !valid {
        bail!("Proof does not match root {}", root);
    }

    if !json && !CliContext::is_quiet() {
        println!("{} Proof verified successfully!", "✓".green());
    }
    Ok(())
}
