//! Prompt builder: fixed system instruction + context block.
//!
//! The template is part of the external contract — downstream behavior
//! (always Spanish, context-only answers, the literal fallback sentence)
//! depends on this exact wording, so it is reproduced verbatim.

use rag_index::ScoredChunk;

/// Fixed system instruction for context-grounded Spanish answers.
pub const SYSTEM_PROMPT: &str = "Eres un asistente útil. Debes responder SIEMPRE en español. \
Usa ÚNICAMENTE el contexto proporcionado para responder. \
Si la respuesta no está claramente en el contexto, responde literalmente: \
'No lo sé con el contexto proporcionado'.";

/// Join retrieved chunk texts into the context block, blank line between
/// chunks, preserving ranking order.
pub fn join_context(hits: &[ScoredChunk]) -> String {
    hits.iter()
        .map(|h| h.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Assemble the final prompt around a prepared context block.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\nContexto:\n{context}\n\nPregunta: {question}\n\nRespuesta (en español):"
    )
}
