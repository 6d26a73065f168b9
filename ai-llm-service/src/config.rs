//! Generation model configuration.

use crate::error_handler::{AiLlmError, Result};

/// Default model tag pulled by the Ollama daemon.
pub const DEFAULT_MODEL: &str = "qwen3:4b";
/// Default Ollama endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
/// Default cap on generated tokens per answer.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 256;

/// Universal configuration for the generation model.
///
/// Loaded once at process start; the daemon keeps the model resident, so
/// neither the client nor the model is recreated per request.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Model identifier, e.g. `qwen3:4b`.
    pub model: String,
    /// Base endpoint, e.g. `http://localhost:11434`.
    pub endpoint: String,
    /// Cap on generated tokens per call.
    pub max_new_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            timeout_secs: 120,
        }
    }
}

impl GeneratorConfig {
    /// Build from environment variables with the fixed defaults above.
    ///
    /// Reads `OLLAMA_MODEL`, `OLLAMA_URL` (falling back to
    /// `http://localhost:{OLLAMA_PORT}`), `GEN_MAX_NEW_TOKENS` and
    /// `GEN_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("OLLAMA_URL").unwrap_or_else(|_| {
            let port = std::env::var("OLLAMA_PORT").unwrap_or_else(|_| "11434".into());
            format!("http://localhost:{port}")
        });

        Self {
            model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            endpoint,
            max_new_tokens: parse_env("GEN_MAX_NEW_TOKENS", DEFAULT_MAX_NEW_TOKENS),
            timeout_secs: parse_env("GEN_TIMEOUT_SECS", 120),
        }
    }

    /// Validates the endpoint scheme and model name.
    ///
    /// # Errors
    /// - [`AiLlmError::InvalidEndpoint`] for an empty or schemeless endpoint
    /// - [`AiLlmError::EmptyModel`] for a blank model identifier
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(AiLlmError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.model.trim().is_empty() {
            return Err(AiLlmError::EmptyModel);
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}
