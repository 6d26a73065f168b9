//! Top-k selection over the fitted chunk vectors.

use crate::vectorizer::SparseVector;

/// Score every chunk vector against the query and return the best `k` as
/// `(chunk position, score)` pairs, descending by score.
///
/// The sort is stable, so equal scores keep their original chunk order —
/// including the all-zero case where no query term is in the vocabulary.
pub fn top_k(query: &SparseVector, vectors: &[SparseVector], k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = vectors
        .iter()
        .map(|v| query.dot(v))
        .enumerate()
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(k.min(scored.len()));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfidfVectorizer;

    #[test]
    fn returns_at_most_k_descending() {
        let corpus: Vec<String> = vec![
            "manzana roja".into(),
            "pera verde".into(),
            "manzana verde".into(),
            "cielo azul".into(),
        ];
        let (fitted, vectors) = TfidfVectorizer::fit_transform(&corpus, 20_000);
        let q = fitted.transform("manzana");

        let hits = top_k(&q, &vectors, 3);
        assert_eq!(hits.len(), 3);
        for pair in hits.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        // Both apple chunks outrank the rest.
        let top_ids: Vec<usize> = hits.iter().take(2).map(|h| h.0).collect();
        assert!(top_ids.contains(&0));
        assert!(top_ids.contains(&2));
    }

    #[test]
    fn k_larger_than_corpus_is_clamped() {
        let corpus: Vec<String> = vec!["solo uno".into()];
        let (fitted, vectors) = TfidfVectorizer::fit_transform(&corpus, 20_000);
        let hits = top_k(&fitted.transform("uno"), &vectors, 10);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn zero_scores_keep_chunk_order() {
        let corpus: Vec<String> = vec!["aa bb".into(), "cc dd".into(), "ee ff".into()];
        let (fitted, vectors) = TfidfVectorizer::fit_transform(&corpus, 20_000);
        // No query term is in the vocabulary: every score is 0.0 and the
        // original order must survive the sort.
        let hits = top_k(&fitted.transform("zz yy"), &vectors, 3);
        let ids: Vec<usize> = hits.iter().map(|h| h.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(hits.iter().all(|h| h.1 == 0.0));
    }
}
