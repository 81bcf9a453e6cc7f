//! Aula CLI — entry point.
//!
//! # Commands
//!
//! - `aula serve [--host H] [--port P] [--logs]` — run the HTTP API
//! - `aula chat [-m MESSAGE]` — practice chat (single-shot or REPL)
//! - `aula ask <QUESTION>` — one knowledge lookup
//! - `aula onboard` — write the default config
//! - `aula status` — show configuration and provider status

mod helpers;
mod onboard;
mod repl;
mod server;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use aula_core::config::{load_config, load_dotenv, Config};
use aula_providers::adapter_from_config;
use aula_tutor::{ConversationService, LookupService};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Aula — ChatGPT practice simulator and course assistant
#[derive(Parser)]
#[command(name = "aula", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API used by the web client
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Practice chat (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Ask the course assistant one question
    Ask {
        /// The question
        question: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize configuration
    Onboard,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    load_dotenv();

    match cli.command {
        Commands::Serve { host, port, logs } => {
            let mut config = load_config(None);
            init_logging(log_filter(logs || config.app.debug, "info"));
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            log_startup(&config);
            server::run(config).await
        }
        Commands::Chat { message, logs } => {
            let config = load_config(None);
            init_logging(log_filter(logs || config.app.debug, "warn"));
            run_chat(&config, message).await
        }
        Commands::Ask { question, logs } => {
            let config = load_config(None);
            init_logging(log_filter(logs || config.app.debug, "warn"));
            run_ask(&config, &question).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat / ask commands
// ─────────────────────────────────────────────

async fn run_chat(config: &Config, message: Option<String>) -> Result<()> {
    let service = ConversationService::from_config(config, adapter_from_config(&config.provider));

    match message {
        Some(msg) => {
            let result = service.converse(&msg).await;
            helpers::print_chat_result(&result);
        }
        None => repl::run(service).await?,
    }

    Ok(())
}

async fn run_ask(config: &Config, question: &str) -> Result<()> {
    let service = LookupService::from_config(config, adapter_from_config(&config.provider));
    debug!(strategy = %service.strategy(), "answering question");
    let result = service.lookup(question).await;
    helpers::print_rag_result(&result);
    Ok(())
}

fn log_startup(config: &Config) {
    let api_key = if config.provider.is_configured() {
        "configured"
    } else {
        "missing"
    };
    info!(
        app = %config.app.name,
        model = %config.provider.model,
        api_key,
        strategy = %config.rag.strategy,
        "starting"
    );
}

/// Filter directive: verbose, or the command's default level.
fn log_filter(verbose: bool, default_level: &str) -> String {
    if verbose {
        "aula=debug,info".to_string()
    } else {
        default_level.to_string()
    }
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(directive: String) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
