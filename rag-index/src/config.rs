//! Runtime configuration for chunking and the fitted vector space.

use crate::errors::RagIndexError;

/// Maximum chunk length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 800;
/// Overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 150;
/// Vocabulary cap for the fitted vector space.
pub const DEFAULT_MAX_FEATURES: usize = 20_000;

/// Configuration for index construction and retrieval.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters. Must stay below
    /// `chunk_size` or the chunker cannot make forward progress.
    pub chunk_overlap: usize,
    /// Keep at most this many vocabulary terms, by corpus frequency.
    pub max_features: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl IndexConfig {
    /// Build from environment variables with the fixed defaults above.
    ///
    /// Reads `CHUNK_SIZE`, `CHUNK_OVERLAP` and `MAX_FEATURES`; unset or
    /// unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            chunk_size: parse_env("CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
            chunk_overlap: parse_env("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP),
            max_features: parse_env("MAX_FEATURES", DEFAULT_MAX_FEATURES),
        }
    }

    /// Validates config values. Call once at startup; the chunker itself
    /// assumes a valid configuration.
    ///
    /// # Errors
    /// Returns `RagIndexError::Config` when a value would break chunking
    /// termination or leave the vector space empty.
    pub fn validate(&self) -> Result<(), RagIndexError> {
        if self.chunk_size == 0 {
            return Err(RagIndexError::Config("chunk_size must be > 0".into()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RagIndexError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.max_features == 0 {
            return Err(RagIndexError::Config("max_features must be > 0".into()));
        }
        Ok(())
    }
}

fn parse_env(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}
