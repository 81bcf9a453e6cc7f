//! Conversation service — the free-practice chat.
//!
//! With a provider the prompt is wrapped in the assistant template and sent to
//! the model. Without one, a canned simulated reply is returned after a short
//! artificial delay so the client still feels a round trip.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use aula_core::config::Config;
use aula_core::types::{ChatReply, ChatResult, Failure};
use aula_core::utils::truncate_string;
use aula_providers::ProviderAdapter;

use crate::dispatch::generate_offloaded;
use crate::prompts;

pub struct ConversationService {
    adapter: Arc<dyn ProviderAdapter>,
    timeout: Duration,
    simulated_latency: Duration,
}

impl ConversationService {
    pub fn new(adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            adapter,
            timeout: Duration::from_secs(60),
            simulated_latency: Duration::from_millis(50),
        }
    }

    /// Build from the loaded config, sharing `adapter` with other services.
    pub fn from_config(config: &Config, adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self::new(adapter)
            .with_timeout(Duration::from_secs(config.provider.timeout_secs.max(1)))
            .with_simulated_latency(Duration::from_millis(config.simulation.latency_ms))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub fn model(&self) -> &str {
        self.adapter.model()
    }

    pub fn is_configured(&self) -> bool {
        self.adapter.is_configured()
    }

    /// Answer one practice prompt.
    pub async fn converse(&self, prompt: &str) -> ChatResult {
        if prompt.trim().is_empty() {
            return ChatResult::Failure(Failure::validation(prompts::EMPTY_PROMPT));
        }

        let Some(provider) = self.adapter.handle().await else {
            debug!(prompt = %truncate_string(prompt, 60), "simulated reply");
            tokio::time::sleep(self.simulated_latency).await;
            return ChatResult::Reply(ChatReply::simulated(
                self.adapter.model(),
                prompts::simulated_reply(prompt),
            ));
        };

        let name = provider.display_name().to_string();
        match generate_offloaded(provider, prompts::chat_prompt(prompt), self.timeout).await {
            Ok(generation) => {
                info!(
                    model = %self.adapter.model(),
                    chars = generation.text.chars().count(),
                    "chat reply generated"
                );
                ChatResult::Reply(ChatReply::generated(
                    self.adapter.model(),
                    generation.text,
                    generation.usage,
                ))
            }
            Err(e) => {
                error!(provider = %name, error = %e, "chat generation failed");
                ChatResult::Failure(Failure::provider(
                    format!("Error al conectar con {name}: {e}"),
                    self.adapter.model(),
                ))
            }
        }
    }
}
