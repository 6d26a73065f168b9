//! Fixed-size overlapping chunk windows over normalized text.
//!
//! Offsets are character positions, not bytes, so multi-byte text never
//! splits inside a UTF-8 sequence. Boundaries are offset-based and may fall
//! mid-word; retrieval tolerates that and the overlap keeps neighboring
//! context available in the adjacent chunk.

use tracing::trace;

/// Split `text` into windows of at most `size` characters where consecutive
/// windows share `overlap` characters.
///
/// The caller must guarantee `overlap < size`; `IndexConfig::validate`
/// enforces this once at startup. Empty input yields an empty sequence —
/// substituting a placeholder for an empty corpus is the index's job, not
/// the chunker's.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    debug_assert!(overlap < size, "chunk overlap must stay below chunk size");

    if text.is_empty() {
        return Vec::new();
    }

    // Byte offset of every character, so windows slice on char boundaries.
    let char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let n_chars = char_starts.len();
    let byte_at = |pos: usize| {
        if pos >= n_chars {
            text.len()
        } else {
            char_starts[pos]
        }
    };

    let mut chunks = Vec::new();
    let mut start = 0usize;

    loop {
        let end = (start + size).min(n_chars);
        chunks.push(text[byte_at(start)..byte_at(end)].to_string());
        if end == n_chars {
            break;
        }
        start = end - overlap;
    }

    trace!(
        "chunk_text: {} chars -> {} chunk(s) (size={size}, overlap={overlap})",
        n_chars,
        chunks.len()
    );
    chunks
}
