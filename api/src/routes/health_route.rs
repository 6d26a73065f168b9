//! GET /health — generation backend status.

use std::sync::Arc;

use axum::{Json, extract::State};

use ai_llm_service::HealthStatus;

use crate::core::app_state::AppState;

/// Handler: GET /health
///
/// Never fails: backend problems are reported inside the status body.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(ai_llm_service::health::check(&state.generator_cfg).await)
}
