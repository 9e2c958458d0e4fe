//! Upload command implementation

use crate::cli::context::CliContext;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Execute the upload command
pub fn execute(dir: PathBuf, json: bool) -> Result<()> {
    let ctx = CliContext::current();
    let service = ctx.upload_service();

    let receipt = service
        .upload_dir(&dir)
        .with_context(|| format!("Failed to upload {}", dir.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else if CliContext::is_quiet() {
        println!("{}", receipt.key);
    } else {
        println!("{} {} files uploaded", "✓".green(), receipt.file_count);
        println!("  {}: {}", "Store Key".bold(), receipt.key.to_string().cyan());
        println!("  {}: {}", "Merkle Root".bold(), receipt.root.to_hex().dimmed());
        if ctx.config.client.remove_after_upload {
            println!("  {} removed {}", "→".cyan(), dir.display());
        }
    }

    Ok(())
}
