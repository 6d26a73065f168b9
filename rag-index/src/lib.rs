//! In-memory lexical retrieval index: extraction + chunking + TF-IDF search.
//!
//! This crate provides a clean API to:
//! - Extract and normalize text from uploaded documents (txt/md/pdf)
//! - Split it into fixed-size overlapping chunks
//! - Fit a TF-IDF vector space over the chunks and serve cosine top-k queries
//!
//! The design is flat (no deep nesting) and splits responsibilities into
//! focused modules. There is no persistence: every ingest rebuilds the whole
//! index from scratch and replaces the previous state in one reference swap.

mod chunker;
mod config;
mod errors;
mod extract;
mod normalize;
mod retrieve;
mod vectorizer;

pub use chunker::chunk_text;
pub use config::IndexConfig;
pub use errors::RagIndexError;
pub use extract::{DocumentFormat, extract};
pub use normalize::normalize_text;
pub use vectorizer::{SparseVector, TfidfVectorizer};

use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, info};

/// Sentinel chunk used when no document yielded any text, so similarity
/// queries never run over an empty collection.
pub const EMPTY_CORPUS_CHUNK: &str = "No documents provided.";

/// Fixed reply for queries issued before any index was ever built.
pub const EMPTY_INDEX_MESSAGE: &str = "Index is empty. Please ingest documents.";

/// A single retrieval hit: chunk text plus cosine score.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredChunk {
    pub text: String,
    pub score: f32,
}

/// One fully fitted index state. Immutable once constructed; `build`
/// assembles a fresh snapshot off to the side and publishes it whole.
struct IndexSnapshot {
    chunks: Vec<String>,
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
}

/// The retrieval index. Cheap to share behind an `Arc`; queries run
/// lock-free on whichever snapshot was current when they started.
pub struct RagIndex {
    cfg: IndexConfig,
    snapshot: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl RagIndex {
    /// Constructs an empty index from the given configuration.
    ///
    /// # Errors
    /// Returns `RagIndexError::Config` when the chunking parameters are
    /// unusable (`overlap >= size`); this is the startup-time gate that lets
    /// the chunker assume valid inputs forever after.
    pub fn new(cfg: IndexConfig) -> Result<Self, RagIndexError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            snapshot: RwLock::new(None),
        })
    }

    /// Rebuild the index from scratch over the given document paths and
    /// return the resulting chunk count.
    ///
    /// Each document runs extract → normalize → chunk; chunk sequences are
    /// concatenated in document order. An aggregate of zero chunks is
    /// replaced by the single [`EMPTY_CORPUS_CHUNK`] placeholder. The
    /// previous snapshot keeps serving queries until the new one is
    /// published via a single reference swap — readers never observe a
    /// half-rebuilt index.
    ///
    /// # Errors
    /// Returns `RagIndexError::Io` when a recognized text file cannot be
    /// read; unsupported and unreadable documents are skipped silently.
    pub fn build<P: AsRef<Path>>(&self, paths: &[P]) -> Result<usize, RagIndexError> {
        let mut chunks: Vec<String> = Vec::new();

        for p in paths {
            let path = p.as_ref();
            let raw = extract::extract(path)?;
            if raw.is_empty() {
                debug!("build: no text extracted from {:?}", path);
                continue;
            }
            let text = normalize::normalize_text(&raw);
            let doc_chunks = chunker::chunk_text(&text, self.cfg.chunk_size, self.cfg.chunk_overlap);
            debug!("build: {:?} -> {} chunk(s)", path, doc_chunks.len());
            chunks.extend(doc_chunks);
        }

        if chunks.is_empty() {
            chunks.push(EMPTY_CORPUS_CHUNK.to_string());
        }

        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&chunks, self.cfg.max_features);
        let count = chunks.len();
        info!(
            "build: fitted {} chunk(s), vocabulary {} term(s)",
            count,
            vectorizer.vocabulary_len()
        );

        self.publish(Arc::new(IndexSnapshot {
            chunks,
            vectorizer,
            vectors,
        }));
        Ok(count)
    }

    /// Return the top `min(k, chunks)` chunks for `question`, descending by
    /// cosine similarity, ties keeping original chunk order.
    ///
    /// Before any `build`, returns exactly one informational pair
    /// ([`EMPTY_INDEX_MESSAGE`], score 0.0) instead of failing. The caller
    /// guarantees `k >= 1`; the boundary layer validates request input.
    pub fn query(&self, question: &str, k: usize) -> Vec<ScoredChunk> {
        let Some(snap) = self.current() else {
            return vec![ScoredChunk {
                text: EMPTY_INDEX_MESSAGE.to_string(),
                score: 0.0,
            }];
        };

        let qv = snap.vectorizer.transform(question);
        retrieve::top_k(&qv, &snap.vectors, k)
            .into_iter()
            .map(|(i, score)| ScoredChunk {
                text: snap.chunks[i].clone(),
                score,
            })
            .collect()
    }

    /// Number of chunks in the current snapshot (0 before the first build).
    pub fn chunk_count(&self) -> usize {
        self.current().map_or(0, |s| s.chunks.len())
    }

    /// Clone the current snapshot handle. A poisoned lock still holds a
    /// consistent snapshot (the swap is a single store), so it is absorbed
    /// rather than propagated.
    fn current(&self) -> Option<Arc<IndexSnapshot>> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, snap: Arc<IndexSnapshot>) {
        let mut guard = match self.snapshot.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(snap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_doc(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn fresh_index() -> RagIndex {
        RagIndex::new(IndexConfig::default()).unwrap()
    }

    #[test]
    fn query_before_any_build_returns_fixed_message() {
        let index = fresh_index();
        let hits = index.query("anything", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, EMPTY_INDEX_MESSAGE);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn empty_corpus_builds_the_placeholder_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let unsupported = write_doc(&dir, "img.png", "binary-ish");

        let index = fresh_index();
        let count = index.build(&[unsupported]).unwrap();
        assert_eq!(count, 1);

        let hits = index.query("whatever", 3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, EMPTY_CORPUS_CHUNK);
    }

    #[test]
    fn no_documents_at_all_builds_the_placeholder_chunk() {
        let index = fresh_index();
        let count = index.build(&Vec::<PathBuf>::new()).unwrap();
        assert_eq!(count, 1);
        assert_eq!(index.query("x", 1)[0].text, EMPTY_CORPUS_CHUNK);
    }

    #[test]
    fn short_document_is_one_normalized_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write_doc(&dir, "sky.txt", "The sky is blue.\nGrass is green.\n");

        let index = fresh_index();
        let count = index.build(&[doc]).unwrap();
        assert_eq!(count, 1);

        let hits = index.query("What color is the sky?", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "The sky is blue. Grass is green.");
    }

    #[test]
    fn verbatim_match_ranks_first_with_higher_score() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_doc(&dir, "a.txt", "El volcán más alto está en Chile.");
        let b = write_doc(&dir, "b.txt", "La receta lleva harina y huevos.");
        let c = write_doc(&dir, "c.txt", "Los trenes salen cada quince minutos.");

        let index = fresh_index();
        index.build(&[b, a, c]).unwrap();

        let hits = index.query("El volcán más alto está en Chile.", 3);
        assert_eq!(hits[0].text, "El volcán más alto está en Chile.");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn results_are_capped_at_k_and_non_increasing() {
        let dir = tempfile::tempdir().unwrap();
        let long: String = "palabra repetida para generar varios fragmentos. "
            .repeat(100);
        let doc = write_doc(&dir, "long.txt", &long);

        let index = fresh_index();
        let count = index.build(&[doc]).unwrap();
        assert!(count > 2);

        let hits = index.query("palabra repetida", 2);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn rebuild_fully_supersedes_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_doc(&dir, "a.txt", "tigres en la selva");
        let b = write_doc(&dir, "b.txt", "barcos en el puerto");

        let index = fresh_index();
        index.build(&[a]).unwrap();
        assert_eq!(index.query("tigres", 1)[0].text, "tigres en la selva");

        index.build(&[b]).unwrap();
        for hit in index.query("tigres en la selva", 10) {
            assert!(!hit.text.contains("tigres"));
        }
    }

    #[test]
    fn chunk_count_tracks_current_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write_doc(&dir, "a.txt", "uno dos tres");

        let index = fresh_index();
        assert_eq!(index.chunk_count(), 0);
        index.build(&[doc]).unwrap();
        assert_eq!(index.chunk_count(), 1);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let cfg = IndexConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            max_features: 10,
        };
        assert!(RagIndex::new(cfg).is_err());
    }
}
