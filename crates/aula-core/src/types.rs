//! Shared types — knowledge entries and the result shapes returned by the
//! conversation and lookup services.
//!
//! Results are serialized straight to the web client, so field names follow
//! its snake_case JSON contract (`is_simulated`, `total_results`, …).

use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Knowledge base
// ─────────────────────────────────────────────

/// Topic category of a knowledge entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fundamentos,
    Prompting,
    Seguridad,
    Curso,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fundamentos => "fundamentos",
            Category::Prompting => "prompting",
            Category::Seguridad => "seguridad",
            Category::Curso => "curso",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the course knowledge base. Defined at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub content: &'static str,
}

// ─────────────────────────────────────────────
// Token usage
// ─────────────────────────────────────────────

/// Token counters reported by the provider. Missing counters are 0.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub candidates_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────

/// Why a service returned a failure. Not serialized; the HTTP layer maps it
/// to a status code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureKind {
    /// Empty or whitespace-only input.
    #[default]
    Validation,
    /// The provider call failed.
    Provider,
}

/// Error-shaped result: `{ "error": "...", ... }`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Failure {
    pub error: String,
    #[serde(skip)]
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_simulated: Option<bool>,
}

impl Failure {
    /// An input validation failure.
    pub fn validation(error: impl Into<String>) -> Self {
        Failure {
            error: error.into(),
            kind: FailureKind::Validation,
            model: None,
            is_simulated: None,
        }
    }

    /// A provider call failure, tagged with the model it was made against.
    pub fn provider(error: impl Into<String>, model: impl Into<String>) -> Self {
        Failure {
            error: error.into(),
            kind: FailureKind::Provider,
            model: Some(model.into()),
            is_simulated: Some(true),
        }
    }
}

// ─────────────────────────────────────────────
// Conversation results
// ─────────────────────────────────────────────

/// A successful conversation reply (real or simulated).
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatReply {
    pub model: String,
    pub reply: String,
    pub is_simulated: bool,
    /// Present on real replies; `null` when the provider sent no usage.
    #[serde(skip_serializing_if = "skip_tokens")]
    pub tokens_used: Option<Option<UsageInfo>>,
}

fn skip_tokens(tokens: &Option<Option<UsageInfo>>) -> bool {
    tokens.is_none()
}

impl ChatReply {
    /// A reply produced by the provider.
    pub fn generated(model: impl Into<String>, reply: impl Into<String>, usage: Option<UsageInfo>) -> Self {
        ChatReply {
            model: model.into(),
            reply: reply.into(),
            is_simulated: false,
            tokens_used: Some(usage),
        }
    }

    /// A locally generated reply (no provider configured).
    pub fn simulated(model: impl Into<String>, reply: impl Into<String>) -> Self {
        ChatReply {
            model: model.into(),
            reply: reply.into(),
            is_simulated: true,
            tokens_used: None,
        }
    }
}

/// Outcome of `converse`: a reply or a failure, never both.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ChatResult {
    Reply(ChatReply),
    Failure(Failure),
}

// ─────────────────────────────────────────────
// Lookup results
// ─────────────────────────────────────────────

/// Where a lookup answer came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    KnowledgeBase,
    Llm,
    NotFound,
    Error,
}

/// A reference attached to a lookup answer.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Source {
    /// A knowledge-base entry.
    Entry {
        id: String,
        title: String,
        category: Category,
    },
    /// The answer was generated by the model.
    Model {
        #[serde(rename = "type")]
        kind: String,
        note: String,
    },
}

impl Source {
    pub fn entry(entry: &KnowledgeEntry) -> Self {
        Source::Entry {
            id: entry.id.to_string(),
            title: entry.title.to_string(),
            category: entry.category,
        }
    }

    pub fn model(note: impl Into<String>) -> Self {
        Source::Model {
            kind: "llm".to_string(),
            note: note.into(),
        }
    }
}

/// A successful lookup (including "not found" and apologetic error answers).
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<Source>,
    pub total_results: usize,
    pub source_type: SourceType,
}

/// Outcome of `lookup`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RagResult {
    Answer(RagAnswer),
    Failure(Failure),
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
