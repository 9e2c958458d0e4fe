//! Get command implementation

use crate::cli::commands::parse_key;
use crate::cli::context::CliContext;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

/// Execute the get command
pub fn execute(key: String, index: usize, json: bool) -> Result<()> {
    let key = parse_key(&key)?;
    let service = CliContext::current().upload_service();

    let file = service
        .download(&key, index)
        .with_context(|| format!("Failed to get file {} under key {}", index, key))?;
    let path = file
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    if json {
        println!(
            "{}",
            json!({
                "key": key,
                "index": index,
                "name": file.name,
                "size": file.content.len(),
                "path": path,
                "verified": true,
            })
        );
    } else if !CliContext::is_quiet() {
        println!(
            "{} File {} ({}) downloaded and verified",
            "✓".green(),
            index,
            file.name.bold()
        );
        println!("  {}: {}", "Saved to".bold(), path.cyan());
    }

    Ok(())
}
