//! Configuration schema.
//!
//! Hierarchy: `Config` → `AppConfig`, `ProviderConfig`, `SimulationConfig`,
//! `RagConfig`, `ServerConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.aula/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub app: AppConfig,
    pub provider: ProviderConfig,
    pub simulation: SimulationConfig,
    pub rag: RagConfig,
    pub server: ServerConfig,
}

// ─────────────────────────────────────────────
// App
// ─────────────────────────────────────────────

/// Application identity and debug switch.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Display name, reported by `/` and `/health`.
    pub name: String,
    /// Verbose logging when set.
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Simulador ChatGPT - Capacitación".to_string(),
            debug: false,
        }
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// LLM provider credentials and call settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key. Empty means simulation mode.
    pub api_key: String,
    /// Custom API base URL (overrides the Gemini default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model identifier, e.g. `"gemini-2.5-flash"`.
    pub model: String,
    /// Upper bound for a single provider call, in seconds.
    pub timeout_secs: u64,
    /// Retry client construction on the next request after a failure.
    /// When false, the first failure disables the provider for the process lifetime.
    pub retry_on_failure: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 60,
            retry_on_failure: false,
        }
    }
}

impl ProviderConfig {
    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// ─────────────────────────────────────────────
// Simulation
// ─────────────────────────────────────────────

/// Settings for the simulated (no provider) reply path.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Artificial delay before a simulated reply, emulating network latency.
    pub latency_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { latency_ms: 50 }
    }
}

// ─────────────────────────────────────────────
// RAG
// ─────────────────────────────────────────────

/// How the lookup service combines keyword matching and the LLM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RagStrategy {
    /// Keyword matcher first, LLM (or fallback) when nothing matches.
    #[default]
    Hybrid,
    /// Keyword matcher only.
    Keyword,
    /// LLM only (or fallback when no provider is available).
    Llm,
}

impl RagStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RagStrategy::Hybrid => "hybrid",
            RagStrategy::Keyword => "keyword",
            RagStrategy::Llm => "llm",
        }
    }
}

impl fmt::Display for RagStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RagStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hybrid" => Ok(RagStrategy::Hybrid),
            "keyword" => Ok(RagStrategy::Keyword),
            "llm" => Ok(RagStrategy::Llm),
            other => Err(format!("unknown RAG strategy: {other}")),
        }
    }
}

/// Knowledge lookup settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RagConfig {
    pub strategy: RagStrategy,
    /// Maximum number of knowledge-base entries returned per question.
    pub max_results: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            strategy: RagStrategy::Hybrid,
            max_results: 3,
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty = allow any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
