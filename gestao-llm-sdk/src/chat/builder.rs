use crate::{
    chat::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole},
    error::LlmError,
};

/// Trait for OpenAI-compatible chat clients
pub trait ChatClientTrait {
    fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> impl std::future::Future<Output = Result<ChatCompletionResponse, LlmError>> + Send;

    /// Model used when the builder does not set one
    fn default_model(&self) -> &str;
}

/// Builder for creating chat completion requests
pub struct ChatMessageBuilder<'a, T: ChatClientTrait> {
    client: &'a T,
    model: Option<String>,
    max_tokens: Option<u32>,
    messages: Vec<ChatMessage>,
    temperature: Option<f32>,
    top_p: Option<f32>,
    stop: Option<Vec<String>>,
}

impl<'a, T: ChatClientTrait> ChatMessageBuilder<'a, T> {
    /// Create a new message builder
    pub fn new(client: &'a T) -> Self {
        Self {
            client,
            model: None,
            max_tokens: None,
            messages: Vec::new(),
            temperature: None,
            top_p: None,
            stop: None,
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the maximum number of tokens to generate
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Add a message to the conversation
    ///
    /// Valid roles: "system", "user", "assistant"
    /// Invalid roles will be treated as "user" by default.
    pub fn message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        let role_str = role.into();
        let role = match role_str.as_str() {
            "system" => ChatRole::System,
            "user" => ChatRole::User,
            "assistant" => ChatRole::Assistant,
            _ => {
                tracing::warn!("Invalid role '{}', defaulting to 'user'", role_str);
                ChatRole::User
            }
        };

        self.messages.push(ChatMessage::new(role, content));
        self
    }

    /// Add a system message
    pub fn system_message(self, content: impl Into<String>) -> Self {
        self.message("system", content)
    }

    /// Add a user message
    pub fn user_message(self, content: impl Into<String>) -> Self {
        self.message("user", content)
    }

    /// Set the temperature for randomness
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the top-p sampling parameter
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set custom stop sequences
    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop = Some(stop_sequences);
        self
    }

    /// Assemble the request without sending it
    pub fn build(self) -> Result<ChatCompletionRequest, LlmError> {
        if self.messages.is_empty() {
            return Err(LlmError::invalid_request("At least one message is required"));
        }

        Ok(ChatCompletionRequest {
            model: self
                .model
                .unwrap_or_else(|| self.client.default_model().to_string()),
            messages: self.messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            stop: self.stop,
            stream: Some(false),
        })
    }

    /// Send the request and get the response
    pub async fn send(self) -> Result<ChatCompletionResponse, LlmError> {
        let client = self.client;
        let request = self.build()?;
        client.create_chat_completion(request).await
    }
}
