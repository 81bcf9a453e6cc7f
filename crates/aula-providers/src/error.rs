//! Provider error type.

use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong constructing or calling a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, TLS, client timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("invalid response: {0}")]
    Parse(String),

    /// The prompt was rejected by the provider's safety filters.
    #[error("prompt blocked: {0}")]
    Blocked(String),

    /// The response had no candidate text.
    #[error("response contained no text")]
    EmptyResponse,

    /// The call exceeded the configured deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The task running the call panicked or was cancelled.
    #[error("provider task failed: {0}")]
    Task(String),

    /// The client could not be constructed.
    #[error("client construction failed: {0}")]
    Build(String),
}
