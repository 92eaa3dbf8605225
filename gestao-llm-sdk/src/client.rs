use crate::{
    error::LlmError,
    types::{CompletionRequest, CompletionResponse},
};
use async_trait::async_trait;

/// Core trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete a request (non-streaming, single attempt)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Get provider name (e.g., "together", "groq")
    fn provider_name(&self) -> &str;

    /// Get the model used when a request does not override it
    fn model_name(&self) -> &str;

    /// Issue a minimal request and report whether the provider answered.
    ///
    /// Never returns an error. A 2xx answer with no text still counts as reachable.
    async fn probe(&self) -> bool {
        match self.complete(CompletionRequest::probe()).await {
            Ok(_) | Err(LlmError::EmptyResponse { .. }) => true,
            Err(e) => {
                tracing::debug!(
                    provider = self.provider_name(),
                    error = %e,
                    "Capability probe failed"
                );
                false
            }
        }
    }
}
