//! LLM Provider trait — the seam between the services and the model API.

use async_trait::async_trait;

use aula_core::types::UsageInfo;

use crate::error::ProviderError;

/// Text produced by one `generate` call.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    /// Generated text.
    pub text: String,
    /// Token counters, when the provider reports them.
    pub usage: Option<UsageInfo>,
}

impl Generation {
    pub fn new(text: impl Into<String>) -> Self {
        Generation {
            text: text.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: UsageInfo) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Trait that all LLM providers implement.
///
/// A provider is bound to one model at construction and receives fully
/// composed prompts: templating happens in the services.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError>;

    /// The model this provider is bound to.
    fn model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
