//! Interactive practice chat.
//!
//! Uses `rustyline` for readline-style editing with persistent history.

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use aula_core::utils::{get_history_path, truncate_string};
use aula_tutor::ConversationService;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["salir", "exit", "quit", "/salir", "/exit", ":q"];

/// Run the REPL until the user exits.
pub async fn run(service: ConversationService) -> Result<()> {
    helpers::print_banner(service.model(), !service.is_configured());

    let mut editor = create_editor()?;

    loop {
        let input = match editor.readline("Tú: ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error de entrada: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\n¡Hasta luego! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        debug!(input = %truncate_string(trimmed, 60), "processing input");
        helpers::print_thinking();
        let result = service.converse(trimmed).await;
        helpers::clear_thinking();
        helpers::print_chat_result(&result);
    }

    save_history(&mut editor);

    Ok(())
}

fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let path = history_file();
    if path.exists() {
        let _ = editor.load_history(&path);
        debug!("loaded REPL history from {}", path.display());
    }

    Ok(editor)
}

fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_file();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

fn history_file() -> std::path::PathBuf {
    get_history_path().join("chat_history")
}

fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}
