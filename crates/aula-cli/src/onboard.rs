//! `aula onboard` — write the default configuration.
//!
//! Creates `~/.aula/config.json` (unless it exists) and the history directory.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use aula_core::config::{get_config_path, save_config, Config};
use aula_core::utils::get_history_path;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🎓 Aula — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    if write_default_config(&config_path)? {
        println!("  {} created config at {}", "✓".green(), config_path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    let history_dir = get_history_path();
    std::fs::create_dir_all(&history_dir)
        .with_context(|| format!("failed to create {}", history_dir.display()))?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    println!();
    println!(
        "{}",
        "  Setup complete! Add your key as GEMINI_API_KEY in .env or as provider.apiKey in the config."
            .green()
    );
    println!("{}", "  Then run `aula serve` or `aula chat`.".green());
    println!();

    Ok(())
}

/// Write a default config to `path` if nothing is there. Returns whether it wrote.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))?;
    Ok(true)
}
