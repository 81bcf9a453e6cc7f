//! Offloaded, time-bounded provider calls.
//!
//! Each call runs on its own tokio task so a slow model never holds up the
//! request handler's task, and is abandoned once the timeout elapses.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use aula_providers::{Generation, LlmProvider, ProviderError};

/// Run `provider.generate(prompt)` on a separate task, bounded by `limit`.
///
/// Timeouts abort the task and become [`ProviderError::Timeout`]; a panicking
/// or cancelled task becomes [`ProviderError::Task`].
pub async fn generate_offloaded(
    provider: Arc<dyn LlmProvider>,
    prompt: String,
    limit: Duration,
) -> Result<Generation, ProviderError> {
    let mut handle = tokio::spawn(async move { provider.generate(&prompt).await });

    match tokio::time::timeout(limit, &mut handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(ProviderError::Task(join_err.to_string())),
        Err(_) => {
            handle.abort();
            warn!(timeout = ?limit, "provider call timed out");
            Err(ProviderError::Timeout(limit))
        }
    }
}
