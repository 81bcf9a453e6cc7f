//! Scripted provider and adapter doubles for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use aula_core::types::UsageInfo;
use aula_providers::{Generation, LlmProvider, ProviderAdapter, ProviderError};

/// What a [`MockProvider`] does on every call.
#[derive(Clone, Debug)]
pub enum Script {
    Reply(String),
    ReplyWithUsage(String, UsageInfo),
    Fail,
    Hang,
    Panic,
}

pub struct MockProvider {
    script: Script,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.script {
            Script::Reply(text) => Ok(Generation::new(text.clone())),
            Script::ReplyWithUsage(text, usage) => {
                Ok(Generation::new(text.clone()).with_usage(usage.clone()))
            }
            Script::Fail => Err(ProviderError::Api {
                status: 500,
                body: "internal".into(),
            }),
            Script::Hang => {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Ok(Generation::new(""))
            }
            Script::Panic => panic!("provider exploded"),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn display_name(&self) -> &str {
        "Mock"
    }
}

/// Adapter that always hands out the same provider, or never does.
pub struct FixedAdapter {
    model: String,
    provider: Option<Arc<MockProvider>>,
    handles: AtomicUsize,
}

impl FixedAdapter {
    pub fn with(provider: Arc<MockProvider>) -> Self {
        Self {
            model: "gemini-test".into(),
            provider: Some(provider),
            handles: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            model: "gemini-test".into(),
            provider: None,
            handles: AtomicUsize::new(0),
        }
    }

    /// How many times a service asked for the provider handle.
    pub fn handles(&self) -> usize {
        self.handles.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderAdapter for FixedAdapter {
    async fn handle(&self) -> Option<Arc<dyn LlmProvider>> {
        self.handles.fetch_add(1, Ordering::SeqCst);
        self.provider
            .clone()
            .map(|p| p as Arc<dyn LlmProvider>)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}
