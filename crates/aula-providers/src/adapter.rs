//! Provider adapter — owns construction of the LLM client.
//!
//! Services never build providers themselves. They ask an adapter for a
//! handle and get `None` when the backend should run in simulation mode.
//!
//! Two implementations, chosen once at startup by [`adapter_from_config`]:
//!
//! - [`UnavailableAdapter`] — no API key; always `None`.
//! - [`LazyProviderAdapter`] — builds the client on first use, memoizes it,
//!   and remembers a failed construction unless `retry_on_failure` is set.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tracing::{error, info};

use aula_core::config::ProviderConfig;

use crate::error::ProviderError;
use crate::gemini::GeminiProvider;
use crate::traits::LlmProvider;

/// Builds a provider. Called at most once per adapter unless retries are on.
pub type ProviderFactory =
    Arc<dyn Fn() -> Result<Arc<dyn LlmProvider>, ProviderError> + Send + Sync>;

/// Hands out the shared provider, or `None` when it is unavailable.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// The provider handle, constructing it on first call.
    async fn handle(&self) -> Option<Arc<dyn LlmProvider>>;

    /// Configured model name, reported even in simulation mode.
    fn model(&self) -> &str;

    /// Whether credentials were supplied at all.
    fn is_configured(&self) -> bool;
}

// ─────────────────────────────────────────────
// UnavailableAdapter
// ─────────────────────────────────────────────

/// Adapter used when no API key is configured.
#[derive(Debug)]
pub struct UnavailableAdapter {
    model: String,
}

impl UnavailableAdapter {
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        info!(model = %model, "no API key configured, using simulation mode");
        Self { model }
    }
}

#[async_trait]
impl ProviderAdapter for UnavailableAdapter {
    async fn handle(&self) -> Option<Arc<dyn LlmProvider>> {
        None
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        false
    }
}

// ─────────────────────────────────────────────
// LazyProviderAdapter
// ─────────────────────────────────────────────

/// Adapter that constructs its provider on first use.
///
/// Construction is single-flight: concurrent first callers wait on the same
/// mutex, and only one of them runs the factory.
pub struct LazyProviderAdapter {
    model: String,
    retry_on_failure: bool,
    factory: ProviderFactory,
    ready: OnceCell<Arc<dyn LlmProvider>>,
    /// `true` once a construction attempt has failed.
    failed: Mutex<bool>,
}

impl std::fmt::Debug for LazyProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyProviderAdapter")
            .field("model", &self.model)
            .field("retry_on_failure", &self.retry_on_failure)
            .field("initialized", &self.ready.initialized())
            .finish()
    }
}

impl LazyProviderAdapter {
    pub fn new(model: impl Into<String>, retry_on_failure: bool, factory: ProviderFactory) -> Self {
        Self {
            model: model.into(),
            retry_on_failure,
            factory,
            ready: OnceCell::new(),
            failed: Mutex::new(false),
        }
    }
}

#[async_trait]
impl ProviderAdapter for LazyProviderAdapter {
    async fn handle(&self) -> Option<Arc<dyn LlmProvider>> {
        if let Some(provider) = self.ready.get() {
            return Some(provider.clone());
        }

        let mut failed = self.failed.lock().await;

        // Another caller may have finished construction while we waited.
        if let Some(provider) = self.ready.get() {
            return Some(provider.clone());
        }
        if *failed && !self.retry_on_failure {
            return None;
        }

        match (self.factory)() {
            Ok(provider) => {
                info!(
                    provider = provider.display_name(),
                    model = %provider.model(),
                    "LLM client initialized"
                );
                *failed = false;
                // Cannot already be set: we hold the lock and checked above.
                let _ = self.ready.set(provider.clone());
                Some(provider)
            }
            Err(e) => {
                error!(
                    model = %self.model,
                    error = %e,
                    retry = self.retry_on_failure,
                    "failed to initialize LLM client"
                );
                *failed = true;
                None
            }
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────

/// Pick the adapter implementation for this process.
pub fn adapter_from_config(config: &ProviderConfig) -> Arc<dyn ProviderAdapter> {
    if !config.is_configured() {
        return Arc::new(UnavailableAdapter::new(config.model.clone()));
    }

    let provider_config = config.clone();
    let factory: ProviderFactory = Arc::new(move || -> Result<Arc<dyn LlmProvider>, ProviderError> {
        let provider = GeminiProvider::new(&provider_config)?;
        Ok(Arc::new(provider) as Arc<dyn LlmProvider>)
    });

    Arc::new(LazyProviderAdapter::new(
        config.model.clone(),
        config.retry_on_failure,
        factory,
    ))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
