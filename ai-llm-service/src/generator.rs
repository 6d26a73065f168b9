//! Non-streaming Ollama generation client.
//!
//! Implements a thin wrapper over `POST {endpoint}/api/generate` with
//! `stream=false`. Decoding is deterministic: temperature 0 and a fixed
//! seed, so the same prompt against the same model state always yields the
//! same output.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GeneratorConfig;
use crate::error_handler::{AiLlmError, Result, make_snippet};

/// Seed pinned for reproducible decoding.
const DECODING_SEED: u64 = 0;

/// Thin client for Ollama text generation.
///
/// Construct once at startup and reuse; the HTTP client carries the
/// configured timeout and is shared across calls.
pub struct OllamaGenerator {
    client: reqwest::Client,
    cfg: GeneratorConfig,
    url_generate: String,
}

impl OllamaGenerator {
    /// Creates a new generator from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::InvalidEndpoint`] / [`AiLlmError::EmptyModel`] from
    ///   config validation
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: GeneratorConfig) -> Result<Self> {
        cfg.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        let base = cfg.endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{base}/api/generate");

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// Configured model identifier.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Configured endpoint base URL.
    pub fn endpoint(&self) -> &str {
        &self.cfg.endpoint
    }

    /// Performs a **non-streaming** generation request via `/api/generate`
    /// and returns the completion trimmed of surrounding whitespace.
    ///
    /// `max_new_tokens` caps the completion length (`options.num_predict`).
    ///
    /// # Errors
    /// - [`AiLlmError::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client errors
    /// - [`AiLlmError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String> {
        let body = GenerateRequest {
            model: &self.cfg.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_new_tokens,
                temperature: 0.0,
                seed: DECODING_SEED,
            },
        };

        debug!("POST {}", self.url_generate);
        let resp = self.client.post(&self.url_generate).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(AiLlmError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            AiLlmError::Decode(format!("serde error: {e}; ensure `stream=false` is used"))
        })?;

        Ok(out.response.trim().to_string())
    }
}

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Decoding options. Greedy by construction.
#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    seed: u64,
}

/// Response body for `/api/generate` (non-streaming).
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_bad_endpoint() {
        let cfg = GeneratorConfig {
            endpoint: "ftp://nowhere".into(),
            ..GeneratorConfig::default()
        };
        assert!(OllamaGenerator::new(cfg).is_err());
    }

    #[test]
    fn generate_url_is_normalized() {
        let cfg = GeneratorConfig {
            endpoint: "http://localhost:11434/".into(),
            ..GeneratorConfig::default()
        };
        let g = OllamaGenerator::new(cfg).unwrap();
        assert_eq!(g.endpoint(), "http://localhost:11434/");
        assert_eq!(g.url_generate, "http://localhost:11434/api/generate");
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateRequest {
            model: "qwen3:4b",
            prompt: "hola",
            stream: false,
            options: GenerateOptions {
                num_predict: 256,
                temperature: 0.0,
                seed: DECODING_SEED,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 256);
        assert_eq!(json["options"]["temperature"], 0.0);
    }
}
