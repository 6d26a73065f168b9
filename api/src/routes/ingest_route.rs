//! POST /ingest — multipart upload, rebuilds the index from scratch.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Response payload for /ingest.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// Total chunks in the rebuilt index.
    pub chunk_count: usize,
    /// Filenames that were staged for ingestion, in upload order.
    pub accepted_filenames: Vec<String>,
}

/// Handler: POST /ingest
///
/// Accepts one or more files as multipart form fields. Every part that
/// carries a filename is staged into a temporary directory and handed to
/// the agent; the whole index is rebuilt from this upload (previous content
/// is fully replaced).
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ingest \
///   -F 'files=@manual.pdf' -F 'files=@notas.txt'
/// ```
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<IngestResponse>> {
    let staging = tempfile::tempdir()?;
    let mut paths = Vec::new();
    let mut accepted_filenames = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(sanitize_filename) else {
            debug!("ingest: skipping multipart field without filename");
            continue;
        };
        if filename.is_empty() {
            return Err(AppError::BadRequest("empty filename".into()));
        }

        let data = field.bytes().await?;
        debug!("ingest: staging {} ({} bytes)", filename, data.len());

        let dest = staging.path().join(&filename);
        std::fs::write(&dest, &data)?;
        paths.push(dest);
        accepted_filenames.push(filename);
    }

    if paths.is_empty() {
        return Err(AppError::BadRequest(
            "no files found in multipart body".into(),
        ));
    }

    // Index construction is CPU-bound; keep it off the async workers. The
    // staging directory lives until after the rebuild completes.
    let agent_state = state.clone();
    let chunk_count = tokio::task::spawn_blocking(move || agent_state.agent.ingest(&paths))
        .await
        .map_err(AppError::Join)??;

    info!(
        "ingest: {} file(s) -> {} chunk(s)",
        accepted_filenames.len(),
        chunk_count
    );

    Ok(Json(IngestResponse {
        chunk_count,
        accepted_filenames,
    }))
}

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\docs\\a.txt"), "a.txt");
        assert_eq!(sanitize_filename("informe.pdf"), "informe.pdf");
        assert_eq!(sanitize_filename("dir/"), "");
    }
}
