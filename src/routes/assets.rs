use std::path::{Component, Path, PathBuf};

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// Serve a file from under the content root. Unknown extensions fall
/// back to `text/plain`; anything unreadable or outside the root is a
/// plain 404, never a 500.
pub async fn serve(state: &AppState, request_path: &str) -> Result<Response, AppError> {
    let file = resolve(&state.config.content_root, request_path).await?;

    let body = tokio::fs::read(&file)
        .await
        .map_err(|_| AppError::NotFound(request_path.to_string()))?;

    let mime = mime_guess::from_path(&file)
        .first_raw()
        .unwrap_or("text/plain");

    Ok(([(header::CONTENT_TYPE, mime)], body).into_response())
}

/// Map a request path onto the content root, confining the result to
/// it. Traversal components are rejected before touching the
/// filesystem; canonicalization then catches symlink escapes.
async fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, AppError> {
    let not_found = || AppError::NotFound(request_path.to_string());

    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(not_found());
    }

    let root = tokio::fs::canonicalize(root).await.map_err(|_| not_found())?;
    let full = tokio::fs::canonicalize(root.join(relative))
        .await
        .map_err(|_| not_found())?;

    if !full.starts_with(&root) {
        return Err(not_found());
    }

    Ok(full)
}
