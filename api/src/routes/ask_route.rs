//! POST /ask — answers a question from the ingested documents.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question.
    pub question: String,
    /// Number of context chunks to retrieve. Defaults to 5.
    #[serde(default)]
    pub k: Option<usize>,
}

/// Response payload for /ask.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final model answer (plain text).
    pub answer: String,
}

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"¿De qué trata el documento?","k":5}'
/// ```
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("question must not be empty".into()));
    }

    let k = body.k.unwrap_or(contextor::DEFAULT_TOP_K);
    if k == 0 {
        return Err(AppError::BadRequest("k must be >= 1".into()));
    }

    let answer = state.agent.answer(question, k).await?;

    Ok(Json(AskResponse { answer }))
}
