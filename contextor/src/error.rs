//! Typed error for the contextor crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Errors from the underlying rag-index crate.
    #[error("index error: {0}")]
    Index(#[from] rag_index::RagIndexError),

    /// Errors from the generation backend.
    #[error("generation error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),
}
