//! Model constants for supported providers
//!
//! Model IDs are the ones the hosted endpoints accept verbatim.

/// Together.xyz model constants
pub mod together {
    /// Llama 3.3 70B Instruct Turbo, free tier (no API key required)
    pub const LLAMA_3_3_70B_FREE_ID: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";
    pub const LLAMA_3_3_70B_FREE_NAME: &str = "Llama 3.3 70B";

    /// DeepSeek V3, requires a Together API key
    pub const DEEPSEEK_V3_ID: &str = "deepseek-ai/DeepSeek-V3";
    pub const DEEPSEEK_V3_NAME: &str = "DeepSeek V3";
}

/// Groq model constants
pub mod groq {
    /// Llama 3.1 70B Versatile - fast hosted inference
    pub const LLAMA_3_1_70B_VERSATILE_ID: &str = "llama-3.1-70b-versatile";
    pub const LLAMA_3_1_70B_VERSATILE_NAME: &str = "Llama 3.1 70B Versatile";
}
