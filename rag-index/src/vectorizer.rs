//! TF-IDF lexical vector space: fit over a chunk corpus, project queries.
//!
//! The vocabulary keeps at most `max_features` terms ranked by corpus
//! frequency; no stopword filtering. Chunk and query vectors are weighted by
//! term frequency times smoothed inverse document frequency and normalized
//! to unit length, so the dot product of two vectors is their cosine
//! similarity.

use std::collections::HashMap;

use tracing::debug;

/// Sparse unit vector over the fitted vocabulary: `(term id, weight)` pairs
/// sorted by term id.
#[derive(Clone, Debug, Default)]
pub struct SparseVector(Vec<(u32, f32)>);

impl SparseVector {
    /// Dot product by merge walk. Both sides are unit-normalized at
    /// construction, so this is the cosine similarity.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0usize, 0usize);
        let mut sum = 0.0f32;
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].0.cmp(&other.0[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.0[i].1 * other.0[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// True when no fitted term occurs in the source text.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sort by term id and scale to unit length (no-op on a zero vector).
    fn from_weights(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_unstable_by_key(|e| e.0);
        let norm = entries.iter().map(|e| e.1 * e.1).sum::<f32>().sqrt();
        if norm > 0.0 {
            for e in &mut entries {
                e.1 /= norm;
            }
        }
        Self(entries)
    }
}

/// A fitted vocabulary plus idf table. Fitting is all-or-nothing: a new
/// corpus gets a freshly fitted instance, never an incremental update.
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and idf table over `corpus` and return the fitted
    /// vectorizer together with one vector per corpus entry, in order.
    pub fn fit_transform(corpus: &[String], max_features: usize) -> (Self, Vec<SparseVector>) {
        let mut doc_counts: Vec<HashMap<String, u32>> = Vec::with_capacity(corpus.len());
        let mut df: HashMap<String, u32> = HashMap::new();
        let mut corpus_freq: HashMap<String, u64> = HashMap::new();

        for text in corpus {
            let mut counts: HashMap<String, u32> = HashMap::new();
            for tok in tokenize(text) {
                *counts.entry(tok).or_insert(0) += 1;
            }
            for (term, &c) in &counts {
                *df.entry(term.clone()).or_insert(0) += 1;
                *corpus_freq.entry(term.clone()).or_insert(0) += c as u64;
            }
            doc_counts.push(counts);
        }

        // Cap the vocabulary by total corpus frequency; ties go to the
        // lexicographically smaller term so the cut is deterministic.
        let mut terms: Vec<(String, u64)> = corpus_freq.into_iter().collect();
        if terms.len() > max_features {
            terms.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            terms.truncate(max_features);
        }
        let mut selected: Vec<String> = terms.into_iter().map(|(t, _)| t).collect();
        selected.sort_unstable();

        let n_docs = corpus.len();
        let mut vocabulary = HashMap::with_capacity(selected.len());
        let mut idf = Vec::with_capacity(selected.len());
        for (id, term) in selected.into_iter().enumerate() {
            let dfreq = df.get(&term).copied().unwrap_or(0);
            // Smoothed idf: ln((1+n)/(1+df)) + 1 keeps every fitted term
            // strictly positive.
            idf.push((((1 + n_docs) as f32) / ((1 + dfreq) as f32)).ln() + 1.0);
            vocabulary.insert(term, id as u32);
        }

        debug!(
            "fit_transform: {} docs, vocabulary {} term(s)",
            n_docs,
            vocabulary.len()
        );

        let fitted = Self { vocabulary, idf };
        let vectors = doc_counts
            .iter()
            .map(|counts| fitted.vectorize(counts))
            .collect();
        (fitted, vectors)
    }

    /// Project arbitrary text into the fitted space. Out-of-vocabulary terms
    /// contribute nothing; the vocabulary is never refitted here.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for tok in tokenize(text) {
            *counts.entry(tok).or_insert(0) += 1;
        }
        self.vectorize(&counts)
    }

    /// Number of fitted vocabulary terms.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn vectorize(&self, counts: &HashMap<String, u32>) -> SparseVector {
        let entries: Vec<(u32, f32)> = counts
            .iter()
            .filter_map(|(term, &c)| {
                self.vocabulary
                    .get(term)
                    .map(|&id| (id, c as f32 * self.idf[id as usize]))
            })
            .collect();
        SparseVector::from_weights(entries)
    }
}

/// Lowercased alphanumeric/underscore runs of at least two characters.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(|t| t.to_lowercase())
        .collect()
}
