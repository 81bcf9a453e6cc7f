//! LLM provider layer for Aula.
//!
//! # Architecture
//!
//! - [`traits::LlmProvider`] — `generate(prompt) → text + usage`, the only
//!   thing the services know about a model
//! - [`gemini::GeminiProvider`] — HTTP client for the Gemini `generateContent` API
//! - [`adapter`] — lazy, single-flight construction of the provider, or a
//!   stub that is always unavailable (simulation mode)

pub mod adapter;
pub mod error;
pub mod gemini;
pub mod traits;

// Re-export main types for convenience
pub use adapter::{adapter_from_config, LazyProviderAdapter, ProviderAdapter, UnavailableAdapter};
pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use traits::{Generation, LlmProvider};
