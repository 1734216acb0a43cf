use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::state::{AppState, SharedState};
use crate::submission::parser;

pub async fn submit(State(state): State<SharedState>, body: Bytes) -> Response {
    forward(&state, &body).await
}

/// Decode the POST body and relay it to the collector. The redirect is
/// unconditional: delivery is best-effort, so a send failure is logged
/// and never changes the client-visible response.
pub async fn forward(state: &AppState, body: &[u8]) -> Response {
    let text = String::from_utf8_lossy(body);
    let decoded = parser::unquote_plus(&text);

    match state.relay.send(decoded.as_bytes()).await {
        Ok(len) => tracing::debug!("relayed {len} bytes to {}", state.relay.target()),
        Err(e) => tracing::warn!("relay send failed: {e}"),
    }

    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}
