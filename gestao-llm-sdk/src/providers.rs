//! Provider name constants
//!
//! This module defines canonical provider names used throughout the SDK

/// Together.xyz provider (free tier and keyed premium)
pub const TOGETHER: &str = "together";

/// Groq provider
pub const GROQ: &str = "groq";
