use ai_llm_service::GeneratorConfig;
use contextor::Agent;
use rag_index::IndexConfig;

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// Owns the single [`Agent`] for the process lifetime; constructed once at
/// startup and shared behind an `Arc`.
pub struct AppState {
    /// Retrieval + generation orchestrator.
    pub agent: Agent,
    /// Generation backend config, kept for health probes.
    pub generator_cfg: GeneratorConfig,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Returns `AppError` when the chunking configuration is unusable or
    /// the generator client cannot be constructed.
    pub fn from_env() -> Result<Self, AppError> {
        let index_cfg = IndexConfig::from_env();
        let generator_cfg = GeneratorConfig::from_env();
        let agent = Agent::new(index_cfg, generator_cfg.clone())?;

        Ok(Self {
            agent,
            generator_cfg,
        })
    }
}
