//! Health checks for the Ollama backend.
//!
//! Two flavors:
//! - [`probe_model`] — strict: `GET {endpoint}/api/tags` must succeed and
//!   the configured model must be listed. Used as the startup gate; a
//!   failure here is fatal to the process.
//! - [`check`] — resilient: never fails, maps every problem into
//!   `HealthStatus { ok: false, .. }`. Suitable for a `/health` endpoint.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::error_handler::{AiLlmError, Result, make_snippet};

/// A serializable health snapshot for the generation backend.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Configured model identifier.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

/// Response shape of `GET /api/tags`.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Strict probe: the backend answers `/api/tags` and lists the configured
/// model (exact tag or same base name).
///
/// # Errors
/// - [`AiLlmError::HttpTransport`] when the daemon is unreachable
/// - [`AiLlmError::HttpStatus`] for a non-2xx tags response
/// - [`AiLlmError::ModelUnavailable`] when the model is not listed
pub async fn probe_model(cfg: &GeneratorConfig) -> Result<()> {
    cfg.validate()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let url = format!("{}/api/tags", cfg.endpoint.trim_end_matches('/'));
    let resp = client.get(&url).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(AiLlmError::HttpStatus {
            status,
            url,
            snippet: make_snippet(&text),
        });
    }

    let tags: TagsResponse = resp
        .json()
        .await
        .map_err(|e| AiLlmError::Decode(format!("tags response: {e}")))?;

    if model_listed(&tags, &cfg.model) {
        info!("probe_model: {:?} available at {}", cfg.model, cfg.endpoint);
        Ok(())
    } else {
        Err(AiLlmError::ModelUnavailable {
            model: cfg.model.clone(),
            endpoint: cfg.endpoint.clone(),
        })
    }
}

/// Resilient probe for a `/health` endpoint: any failure becomes
/// `ok = false` with a descriptive message.
pub async fn check(cfg: &GeneratorConfig) -> HealthStatus {
    let started = Instant::now();
    let outcome = probe_model(cfg).await;
    let latency_ms = started.elapsed().as_millis();

    match outcome {
        Ok(()) => HealthStatus {
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok: true,
            latency_ms,
            message: "model available".into(),
        },
        Err(e) => {
            warn!("health check failed: {e}");
            HealthStatus {
                endpoint: cfg.endpoint.clone(),
                model: cfg.model.clone(),
                ok: false,
                latency_ms,
                message: e.to_string(),
            }
        }
    }
}

/// Exact tag match, or base-name match when the config omits the tag
/// (`qwen3` matches `qwen3:4b`).
fn model_listed(tags: &TagsResponse, model: &str) -> bool {
    tags.models.iter().any(|m| {
        m.name == model || m.name.split(':').next() == Some(model)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> TagsResponse {
        TagsResponse {
            models: names
                .iter()
                .map(|n| TagEntry {
                    name: n.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn exact_tag_matches() {
        assert!(model_listed(&tags(&["qwen3:4b", "llama3:8b"]), "qwen3:4b"));
    }

    #[test]
    fn base_name_matches_any_tag() {
        assert!(model_listed(&tags(&["qwen3:4b"]), "qwen3"));
    }

    #[test]
    fn missing_model_does_not_match() {
        assert!(!model_listed(&tags(&["llama3:8b"]), "qwen3:4b"));
        assert!(!model_listed(&tags(&[]), "qwen3:4b"));
    }

    #[tokio::test]
    async fn unreachable_backend_fails_strict_probe() {
        let cfg = GeneratorConfig {
            endpoint: "http://127.0.0.1:1".into(),
            ..GeneratorConfig::default()
        };
        assert!(probe_model(&cfg).await.is_err());
        let status = check(&cfg).await;
        assert!(!status.ok);
    }
}
