pub mod client;

pub use client::TogetherClient;

// Re-export Together model constants
pub use crate::models::together::*;
