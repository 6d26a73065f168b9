use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),

    #[error(transparent)]
    Agent(#[from] contextor::ContextorError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed")]
    Join(#[source] tokio::task::JoinError),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // Upstream generation backend failures surface as 502.
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::Agent(contextor::ContextorError::Llm(_)) => StatusCode::BAD_GATEWAY,

            // 5xx
            AppError::Agent(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Io(_)
            | AppError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Llm(_) => "LLM_BACKEND_ERROR",
            AppError::Agent(contextor::ContextorError::Llm(_)) => "LLM_BACKEND_ERROR",
            AppError::Agent(_) => "AGENT_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Join(_) => "JOIN_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Convert common Axum rejections to `AppError`.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
