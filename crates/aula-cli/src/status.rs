//! `aula status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use aula_core::config::{get_config_path, load_config};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🎓 Aula Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".red().to_string()
        }
    );
    println!("  {:<18} {}", "App:".bold(), config.app.name);

    println!();
    let key_status = if config.provider.is_configured() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured, simulation mode".dimmed())
    };
    println!("  {:<18} {}", "Gemini:".bold(), key_status);
    println!("  {:<18} {}", "Model:".bold(), config.provider.model);
    println!(
        "  {:<18} {}",
        "Parameters:".bold(),
        format!(
            "timeout: {}s | retry on failure: {}",
            config.provider.timeout_secs, config.provider.retry_on_failure
        )
        .dimmed()
    );

    println!();
    println!(
        "  {:<18} {} {}",
        "RAG strategy:".bold(),
        config.rag.strategy,
        format!("(max {} results)", config.rag.max_results).dimmed()
    );
    println!(
        "  {:<18} http://{}",
        "Server:".bold(),
        config.server.bind_address()
    );
    let cors = if config.server.cors_origins.is_empty() {
        "any origin".to_string()
    } else {
        config.server.cors_origins.join(", ")
    };
    println!("  {:<18} {}", "CORS:".bold(), cors);

    println!();

    Ok(())
}
