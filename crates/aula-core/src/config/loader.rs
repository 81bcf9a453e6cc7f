//! Config loader — reads `~/.aula/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.aula/config.json`
//! 3. Environment variables `AULA_<SECTION>__<FIELD>` (override JSON)
//! 4. Plain variables `GEMINI_API_KEY`, `GEMINI_MODEL`, `APP_NAME`, `DEBUG`
//!    (the names the web client's deployment `.env` files already use)

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info, warn};

use super::schema::{Config, DEFAULT_MODEL};

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load a `.env` file from the working directory into the process
/// environment, if one exists. Existing variables are not overwritten.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(c) => normalize(c),
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Replace values that parse but cannot be used: a blank model name and a
/// zero provider timeout fall back to their defaults.
fn normalize(mut config: Config) -> Config {
    if config.provider.model.trim().is_empty() {
        warn!("Config has a blank provider model, using {}", DEFAULT_MODEL);
        config.provider.model = DEFAULT_MODEL.to_string();
    }
    if config.provider.timeout_secs == 0 {
        warn!("Config has a zero provider timeout, using 60s");
        config.provider.timeout_secs = 60;
    }
    config
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> anyhow::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(config).context("failed to serialize config")?;

    std::fs::write(&config_path, json)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// `lookup` resolves a variable name to its value; production code passes
/// `std::env::var`, tests pass a map.
///
/// Supported overrides:
/// - `AULA_APP__NAME`, `AULA_APP__DEBUG`
/// - `AULA_PROVIDER__API_KEY`, `AULA_PROVIDER__API_BASE`, `AULA_PROVIDER__MODEL`
/// - `AULA_PROVIDER__TIMEOUT_SECS`, `AULA_PROVIDER__RETRY_ON_FAILURE`
/// - `AULA_SIMULATION__LATENCY_MS`
/// - `AULA_RAG__STRATEGY`, `AULA_RAG__MAX_RESULTS`
/// - `AULA_SERVER__HOST`, `AULA_SERVER__PORT`, `AULA_SERVER__CORS_ORIGINS` (comma-separated)
/// - `GEMINI_API_KEY`, `GEMINI_MODEL`, `APP_NAME`, `DEBUG`
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // App
    if let Some(val) = lookup("AULA_APP__NAME") {
        config.app.name = val;
    }
    if let Some(val) = lookup("AULA_APP__DEBUG") {
        config.app.debug = parse_bool(&val);
    }

    // Provider
    if let Some(val) = lookup("AULA_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Some(val) = lookup("AULA_PROVIDER__API_BASE") {
        config.provider.api_base = Some(val);
    }
    if let Some(val) = lookup("AULA_PROVIDER__MODEL") {
        if val.trim().is_empty() {
            warn!("Ignoring blank AULA_PROVIDER__MODEL");
        } else {
            config.provider.model = val;
        }
    }
    if let Some(val) = lookup("AULA_PROVIDER__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(n) if n > 0 => config.provider.timeout_secs = n,
            _ => warn!("Ignoring invalid AULA_PROVIDER__TIMEOUT_SECS={}", val),
        }
    }
    if let Some(val) = lookup("AULA_PROVIDER__RETRY_ON_FAILURE") {
        config.provider.retry_on_failure = parse_bool(&val);
    }

    // Simulation
    if let Some(val) = lookup("AULA_SIMULATION__LATENCY_MS") {
        match val.parse::<u64>() {
            Ok(n) => config.simulation.latency_ms = n,
            Err(_) => warn!("Ignoring invalid AULA_SIMULATION__LATENCY_MS={}", val),
        }
    }

    // RAG
    if let Some(val) = lookup("AULA_RAG__STRATEGY") {
        match val.parse() {
            Ok(strategy) => config.rag.strategy = strategy,
            Err(e) => warn!("Ignoring AULA_RAG__STRATEGY: {}", e),
        }
    }
    if let Some(val) = lookup("AULA_RAG__MAX_RESULTS") {
        match val.parse::<usize>() {
            Ok(n) if n > 0 => config.rag.max_results = n,
            _ => warn!("Ignoring invalid AULA_RAG__MAX_RESULTS={}", val),
        }
    }

    // Server
    if let Some(val) = lookup("AULA_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(val) = lookup("AULA_SERVER__PORT") {
        match val.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!("Ignoring invalid AULA_SERVER__PORT={}", val),
        }
    }
    if let Some(val) = lookup("AULA_SERVER__CORS_ORIGINS") {
        config.server.cors_origins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    // Plain names
    if let Some(val) = lookup("GEMINI_API_KEY") {
        config.provider.api_key = val;
    }
    if let Some(val) = lookup("GEMINI_MODEL") {
        if !val.trim().is_empty() {
            config.provider.model = val;
        }
    }
    if let Some(val) = lookup("APP_NAME") {
        config.app.name = val;
    }
    if let Some(val) = lookup("DEBUG") {
        config.app.debug = parse_bool(&val);
    }

    config
}

fn parse_bool(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RagStrategy;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        assert_eq!(config.provider.model, "gemini-2.5-flash");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "provider": {
                "apiKey": "AIza-test",
                "model": "gemini-2.0-flash",
                "retryOnFailure": true
            },
            "rag": { "strategy": "keyword" }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert!(config.provider.is_configured());
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert!(config.provider.retry_on_failure);
        assert_eq!(config.rag.strategy, RagStrategy::Keyword);
        // Default preserved
        assert_eq!(config.provider.timeout_secs, 60);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.rag.max_results, 3);
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.simulation.latency_ms, 50);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.provider.model = "gemini-1.5-pro".to_string();
        config.server.cors_origins = vec!["http://localhost:5173".to_string()];

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.provider.model, "gemini-1.5-pro");
        assert_eq!(reloaded.server.cors_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["simulation"].get("latencyMs").is_some());
        assert!(raw["simulation"].get("latency_ms").is_none());
    }

    #[test]
    fn test_env_override_prefixed() {
        let config = apply_env_overrides(
            Config::default(),
            env(&[
                ("AULA_PROVIDER__MODEL", "test-model"),
                ("AULA_PROVIDER__RETRY_ON_FAILURE", "true"),
                ("AULA_SERVER__PORT", "9999"),
                ("AULA_RAG__STRATEGY", "llm"),
                ("AULA_SERVER__CORS_ORIGINS", "http://a.test, http://b.test,"),
            ]),
        );
        assert_eq!(config.provider.model, "test-model");
        assert!(config.provider.retry_on_failure);
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.rag.strategy, RagStrategy::Llm);
        assert_eq!(config.server.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_env_override_plain_names_win() {
        let config = apply_env_overrides(
            Config::default(),
            env(&[
                ("AULA_PROVIDER__API_KEY", "from-prefixed"),
                ("GEMINI_API_KEY", "from-plain"),
                ("GEMINI_MODEL", "gemini-exp"),
                ("DEBUG", "True"),
            ]),
        );
        assert_eq!(config.provider.api_key, "from-plain");
        assert_eq!(config.provider.model, "gemini-exp");
        assert!(config.app.debug);
    }

    #[test]
    fn test_env_override_invalid_values_ignored() {
        let config = apply_env_overrides(
            Config::default(),
            env(&[
                ("AULA_SERVER__PORT", "not-a-port"),
                ("AULA_RAG__MAX_RESULTS", "0"),
                ("AULA_RAG__STRATEGY", "vector"),
                ("GEMINI_MODEL", "  "),
            ]),
        );
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.rag.max_results, 3);
        assert_eq!(config.rag.strategy, RagStrategy::Hybrid);
        assert_eq!(config.provider.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_blank_model_in_file_falls_back() {
        let file = write_temp_json(r#"{ "provider": { "model": "   ", "timeoutSecs": 0 } }"#);
        let config = load_config_from_path(file.path());
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.provider.timeout_secs, 60);
    }

    #[test]
    fn test_blank_prefixed_model_ignored() {
        let config = apply_env_overrides(
            Config::default(),
            env(&[("AULA_PROVIDER__MODEL", ""), ("AULA_PROVIDER__TIMEOUT_SECS", "0")]),
        );
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.provider.timeout_secs, 60);

        let config = apply_env_overrides(
            Config::default(),
            env(&[("AULA_PROVIDER__MODEL", " \t ")]),
        );
        assert_eq!(config.provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(parse_bool(" ON "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
