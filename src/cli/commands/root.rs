use crate::cli::commands::parse_key;
use crate::cli::context::CliContext;
use anyhow::Result;
use colored::Colorize;

/// Execute the root command
pub fn execute(key: Option<String>) -> Result<()> {
    let registry = CliContext::current().root_registry();

    if let Some(key) = key {
        let key = parse_key(&key)?;
        println!("{}", registry.load(&key)?.to_hex());
        return Ok(());
    }

    let keys = registry.keys()?;
    if keys.is_empty() {
        if !CliContext::is_quiet() {
            println!("{}", "No uploads recorded".yellow());
            println!("  {} Use 'proofstore upload <dir>' to upload a directory", "→".cyan());
        }
        return Ok(());
    }

    for key in keys {
        let root = registry.load(&key)?;
        println!("{}  {}", key.to_string().cyan(), root.to_hex());
    }
    Ok(())
}
