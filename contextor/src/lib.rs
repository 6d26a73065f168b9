//! Document QA agent: retrieval + generation behind two operations.
//!
//! Public API: [`Agent`]. `ingest` rebuilds the in-memory index over a set
//! of staged document paths; `answer` retrieves top-k context for a
//! question, assembles the fixed Spanish prompt and calls the generation
//! model. The agent owns exactly one index and one generator for the whole
//! process lifetime — construct it once at startup and share it behind an
//! `Arc`; there is no hidden module-level state.

mod error;
mod prompt;

pub use error::ContextorError;
pub use prompt::{SYSTEM_PROMPT, build_prompt, join_context};

use std::path::Path;

use ai_llm_service::{GeneratorConfig, OllamaGenerator};
use rag_index::{IndexConfig, RagIndex, ScoredChunk};
use tracing::{debug, info};

/// Number of context chunks retrieved when the caller does not say.
pub const DEFAULT_TOP_K: usize = 5;

/// The orchestrator: one retrieval index + one generation client.
pub struct Agent {
    index: RagIndex,
    generator: OllamaGenerator,
    max_new_tokens: u32,
}

impl Agent {
    /// Construct the agent from its two configs.
    ///
    /// # Errors
    /// Propagates index configuration errors (`overlap >= size`) and
    /// generator construction errors; both are startup-time failures.
    pub fn new(index_cfg: IndexConfig, gen_cfg: GeneratorConfig) -> Result<Self, ContextorError> {
        let max_new_tokens = gen_cfg.max_new_tokens;
        Ok(Self {
            index: RagIndex::new(index_cfg)?,
            generator: OllamaGenerator::new(gen_cfg)?,
            max_new_tokens,
        })
    }

    /// Rebuild the index from scratch over the given document paths and
    /// return the resulting chunk count. Idempotent; a later call fully
    /// replaces the result of an earlier one.
    ///
    /// # Errors
    /// Returns `ContextorError::Index` when a staged text file cannot be
    /// read.
    pub fn ingest<P: AsRef<Path>>(&self, paths: &[P]) -> Result<usize, ContextorError> {
        let count = self.index.build(paths)?;
        info!("ingest: index rebuilt with {count} chunk(s)");
        Ok(count)
    }

    /// Top-k relevant chunks for a query, without generation.
    pub fn retrieve(&self, question: &str, k: usize) -> Vec<ScoredChunk> {
        self.index.query(question, k)
    }

    /// Answer a question from the ingested documents: retrieve top-k
    /// context, build the fixed prompt, generate, and return the model
    /// output verbatim.
    ///
    /// The caller guarantees `k >= 1` (the HTTP boundary validates input
    /// before it gets here).
    ///
    /// # Errors
    /// Returns `ContextorError::Llm` when the generation backend fails.
    pub async fn answer(&self, question: &str, k: usize) -> Result<String, ContextorError> {
        let hits = self.index.query(question, k);
        debug!("answer: {} context chunk(s) retrieved", hits.len());

        let context = prompt::join_context(&hits);
        let full_prompt = prompt::build_prompt(question, &context);

        let text = self
            .generator
            .generate(&full_prompt, self.max_new_tokens)
            .await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_agent() -> Agent {
        Agent::new(IndexConfig::default(), GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn ingest_then_retrieve_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nota.txt");
        std::fs::write(&path, "El gato duerme en el sofá.").unwrap();

        let agent = test_agent();
        let count = agent.ingest(&[path]).unwrap();
        assert_eq!(count, 1);

        let hits = agent.retrieve("¿Dónde duerme el gato?", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "El gato duerme en el sofá.");
    }

    #[test]
    fn retrieve_before_ingest_returns_the_empty_index_message() {
        let agent = test_agent();
        let hits = agent.retrieve("hola", 3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, rag_index::EMPTY_INDEX_MESSAGE);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn repeated_ingest_replaces_the_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("uno.txt");
        let second = dir.path().join("dos.txt");
        std::fs::write(&first, "contenido inicial sobre planetas").unwrap();
        std::fs::write(&second, "contenido nuevo sobre océanos").unwrap();

        let agent = test_agent();
        agent.ingest(&[first]).unwrap();
        agent.ingest(&[second]).unwrap();

        for hit in agent.retrieve("planetas", 10) {
            assert!(!hit.text.contains("planetas"));
        }
    }

    #[tokio::test]
    async fn answer_surfaces_generator_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "texto de prueba").unwrap();

        let gen_cfg = GeneratorConfig {
            endpoint: "http://127.0.0.1:1".into(),
            timeout_secs: 1,
            ..GeneratorConfig::default()
        };
        let agent = Agent::new(IndexConfig::default(), gen_cfg).unwrap();
        agent.ingest(&[path]).unwrap();

        let err = agent.answer("¿qué dice?", 1).await;
        assert!(matches!(err, Err(ContextorError::Llm(_))));
    }
}
