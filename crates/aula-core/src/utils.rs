//! Utility helpers — path resolution, timestamps, string truncation.

use std::path::PathBuf;

/// Get the Aula data directory (e.g. `~/.aula/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".aula")
}

/// Get the REPL history directory (e.g. `~/.aula/history/`).
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history")
}

/// Get current ISO 8601 timestamp.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// First `max_chars` characters of `s`. Unicode-safe, no ellipsis.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe. Used for log previews.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_short() {
        assert_eq!(take_chars("hola", 200), "hola");
    }

    #[test]
    fn test_take_chars_exact() {
        assert_eq!(take_chars("hola", 4), "hola");
    }

    #[test]
    fn test_take_chars_unicode() {
        assert_eq!(take_chars("¿Qué es?", 4), "¿Qué");
        assert_eq!(take_chars("ñññ", 0), "");
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate_string("inteligencia artificial", 8), "intel...");
        assert_eq!(truncate_string("こんにちは世界です", 5), "こん...");
    }

    #[test]
    fn test_timestamp_is_valid() {
        let ts = timestamp();
        chrono::DateTime::parse_from_rfc3339(&ts).unwrap();
    }

    #[test]
    fn test_data_path_ends_with_aula() {
        assert!(get_data_path().ends_with(".aula"));
        assert!(get_history_path().parent().unwrap().ends_with(".aula"));
    }
}
