//! Demo command implementation

use crate::cli::context::CliContext;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the demo command
pub fn execute(dir: PathBuf) -> Result<()> {
    let service = CliContext::current().upload_service();

    println!("{}", "Upload and verified download".green().bold());
    println!("{}", "═".repeat(50).green());
    println!(
        "Uploading files from '{}'; the merkle root of the set is recorded locally.",
        dir.display()
    );

    let receipt = service
        .upload_dir(&dir)
        .with_context(|| format!("Failed to upload {}", dir.display()))?;
    println!("{}: {}", "Store Key".bold(), receipt.key.to_string().cyan());
    println!("{}: {}", "Merkle Root".bold(), receipt.root.to_hex().dimmed());

    println!();
    println!("Downloading each file by key and index, checking its proof against the local root.");
    for index in 0..receipt.file_count {
        let file = service
            .download(&receipt.key, index)
            .with_context(|| format!("Failed to get file {}", index))?;
        println!(
            "  {} File {} ({}) downloaded and verified",
            "✓".green(),
            index,
            file.name
        );
    }

    Ok(())
}
