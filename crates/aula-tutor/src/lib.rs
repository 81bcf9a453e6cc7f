//! Services behind the training simulator.
//!
//! - [`conversation::ConversationService`] — free practice chat, real or simulated
//! - [`lookup::LookupService`] — course questions answered from the knowledge
//!   base, the model, or a fixed fallback
//!
//! Both take an [`aula_providers::ProviderAdapter`] at construction and never
//! return `Err`: every outcome is a result shape the web client understands.

pub mod conversation;
pub mod dispatch;
pub mod knowledge;
pub mod lookup;
pub mod prompts;

#[cfg(test)]
pub(crate) mod testing;

pub use conversation::ConversationService;
pub use knowledge::KNOWLEDGE_BASE;
pub use lookup::{match_entries, LookupService};
