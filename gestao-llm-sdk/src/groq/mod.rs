pub mod client;

pub use client::GroqClient;

// Re-export Groq model constants
pub use crate::models::groq::*;
