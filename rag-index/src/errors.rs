//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for rag-index operations.
#[derive(Debug, Error)]
pub enum RagIndexError {
    /// I/O or filesystem errors while reading a staged document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),
}
