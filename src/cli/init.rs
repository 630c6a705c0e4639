//! Init command - write an example configuration file

use crate::config::{CONFIG_FILE_NAME, EXAMPLE_CONFIG};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    println!("\n{} Initializing contract-risk\n", style("⚖").bold());

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(CONFIG_FILE_NAME).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Analyze a contract", style("contract-risk analyze contract.txt").cyan());
    println!("  {} Run the evaluation cases", style("contract-risk eval").cyan());

    Ok(())
}
