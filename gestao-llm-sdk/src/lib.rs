//! # Gestão LLM SDK
//!
//! Thin clients for the hosted chat-completion providers used by the
//! Gestão Profissional assistant. Every client speaks the OpenAI-compatible
//! chat completions protocol and implements [`client::LlmClient`].
//!
//! ## Free tier example
//!
//! ```rust,no_run
//! use gestao_llm_sdk::together::TogetherClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // No API key required for the free Llama model
//!     let client = TogetherClient::new()?;
//!     let response = client
//!         .message_builder()
//!         .max_tokens(1000)
//!         .system_message("Responda em português brasileiro.")
//!         .user_message("Quantos profissionais sabem React?")
//!         .send()
//!         .await?;
//!
//!     println!("Response: {:?}", response.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Groq example
//!
//! ```rust,no_run
//! use gestao_llm_sdk::client::LlmClient;
//! use gestao_llm_sdk::groq::GroqClient;
//! use gestao_llm_sdk::types::{CompletionRequest, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GroqClient::new("your-groq-api-key")?;
//!     let response = client
//!         .complete(CompletionRequest::new(vec![Message::user("Olá!")], 100))
//!         .await?;
//!
//!     println!("Response: {}", response.content);
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod client;
pub mod error;
pub mod groq;
pub mod models;
pub mod providers;
pub mod together;
pub mod types;
