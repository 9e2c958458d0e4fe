//! Configuration command implementation

use crate::cli::context::CliContext;
use crate::cli::ConfigAction;
use crate::config::Config;
use anyhow::{bail, Result};
use colored::Colorize;

/// Execute the config command
pub fn execute(action: ConfigAction) -> Result<()> {
    let ctx = CliContext::current();

    match action {
        ConfigAction::Show => {
            let config_path = match &ctx.config_path {
                Some(path) => path.clone(),
                None => Config::get_config_path()?,
            };
            if !CliContext::is_quiet() {
                let status = if config_path.exists() {
                    "exists".green()
                } else {
                    "not created yet".yellow()
                };
                println!(
                    "# {}: {} ({})",
                    "Configuration file".bold(),
                    config_path.display(),
                    status
                );
            }
            print!("{}", ctx.config.to_toml()?);
        },
        ConfigAction::Init { force } => {
            let config_path = match &ctx.config_path {
                Some(path) => path.clone(),
                None => Config::get_config_path()?,
            };
            if config_path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            let written = Config::default().save(Some(&config_path))?;
            if !CliContext::is_quiet() {
                println!("{} Wrote {}", "✓".green(), written.display());
            }
        },
    }

    Ok(())
}
