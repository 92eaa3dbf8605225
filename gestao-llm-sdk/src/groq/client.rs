use std::time::Duration;

use async_trait::async_trait;

use crate::{
    chat::{
        transport::{self, DEFAULT_TIMEOUT},
        ChatClientTrait, ChatCompletionRequest, ChatCompletionResponse, ChatMessageBuilder,
    },
    error::LlmError,
    models,
    types::{CompletionRequest, CompletionResponse},
};

/// Groq serves its OpenAI-compatible API under the `/openai` prefix
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";

/// Groq chat completions client
pub struct GroqClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl GroqClient {
    /// Create a new Groq client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: models::groq::LLAMA_3_1_70B_VERSATILE_ID.to_string(),
            http_client: transport::build_http_client(DEFAULT_TIMEOUT)?,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model for requests that do not pick one
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the HTTP client with one using the given timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.http_client = transport::build_http_client(timeout)?;
        Ok(self)
    }

    /// Create a chat completion using the Groq Chat Completions API
    pub async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        transport::send_chat_completion(
            &self.http_client,
            &self.base_url,
            Some(&self.api_key),
            &request,
        )
        .await
    }

    /// Start building a chat completion request
    pub fn message_builder(&self) -> ChatMessageBuilder<'_, GroqClient> {
        ChatMessageBuilder::new(self)
    }
}

impl ChatClientTrait for GroqClient {
    fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> impl std::future::Future<Output = Result<ChatCompletionResponse, LlmError>> + Send {
        self.create_chat_completion(request)
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl crate::client::LlmClient for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let chat_request = transport::to_chat_request(request, &self.model);
        let chat_response = self.create_chat_completion(chat_request).await?;
        transport::to_completion_response(chat_response)
    }

    fn provider_name(&self) -> &str {
        crate::providers::GROQ
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
