//! HTTP boundary for the document QA agent.
//!
//! Exposes three routes over a shared [`AppState`]:
//! - `POST /ingest` — multipart upload, rebuilds the index
//! - `POST /ask`    — JSON question, answers from the ingested documents
//! - `GET  /health` — generation backend status
//!
//! Startup is gated on the generation model being available; a backend
//! without the configured model is a fatal configuration error, not a
//! per-request fallback.

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::routes::{
    ask_route::ask, health_route::health, ingest_route::ingest,
};

/// Build state, verify the generation backend, bind and serve.
///
/// # Errors
/// Returns `AppError` when configuration is invalid, the generation model
/// is unavailable, or the listener cannot be bound.
pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let state = Arc::new(AppState::from_env()?);

    // The model must be resident before the first request is accepted.
    ai_llm_service::health::probe_model(&state.generator_cfg).await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ingest", post(ingest))
        .route("/ask", post(ask))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    tracing::info!("listening on http://{host_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
