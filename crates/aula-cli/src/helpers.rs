//! Shared CLI helpers — result printing, banner, thinking indicator.

use colored::Colorize;

use aula_core::types::{ChatResult, RagResult, Source, SourceType};

/// Print a conversation result to stdout (failures to stderr).
pub fn print_chat_result(result: &ChatResult) {
    match result {
        ChatResult::Reply(reply) => {
            println!();
            let label = if reply.is_simulated {
                format!("🤖 {} (simulación)", reply.model)
            } else {
                format!("🤖 {}", reply.model)
            };
            println!("{}", label.cyan().bold());
            println!("{}", reply.reply);
            if let Some(Some(usage)) = &reply.tokens_used {
                println!(
                    "{}",
                    format!("tokens: {} in / {} out", usage.prompt_tokens, usage.candidates_tokens)
                        .dimmed()
                );
            }
            println!();
        }
        ChatResult::Failure(failure) => eprintln!("\n❌ {}\n", failure.error),
    }
}

/// Print a lookup answer and its sources.
pub fn print_rag_result(result: &RagResult) {
    match result {
        RagResult::Answer(answer) => {
            println!();
            println!("{}", source_label(answer.source_type).cyan().bold());
            println!("{}", answer.answer);
            if !answer.sources.is_empty() {
                println!();
                println!("{}", "Fuentes:".bold());
                for source in &answer.sources {
                    println!("  {}", format_source(source).dimmed());
                }
            }
            println!();
        }
        RagResult::Failure(failure) => eprintln!("\n❌ {}\n", failure.error),
    }
}

fn source_label(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::KnowledgeBase => "📚 Base de conocimiento",
        SourceType::Llm => "🤖 Respuesta de la IA",
        SourceType::NotFound => "🔍 Sin resultados",
        SourceType::Error => "⚠️  Error",
    }
}

fn format_source(source: &Source) -> String {
    match source {
        Source::Entry { id, title, category } => format!("· {title} [{category}] ({id})"),
        Source::Model { note, .. } => format!("· {note}"),
    }
}

/// Print the banner shown at REPL start.
pub fn print_banner(model: &str, simulated: bool) {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🎓 Aula".cyan().bold(), version.dimmed());
    let mode = if simulated {
        "modo simulación".yellow().to_string()
    } else {
        model.green().to_string()
    };
    println!("{}", format!("Modelo: {mode}").dimmed());
    println!("{}", "Escribe un mensaje, o \"salir\" para terminar.".dimmed());
    println!();
}

/// Print a "thinking" placeholder.
pub fn print_thinking() {
    eprint!("{}", "⠿ pensando...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}
