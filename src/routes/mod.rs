pub mod assets;
pub mod submit;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use crate::error::AppError;
use crate::state::SharedState;

/// POSTs to the page paths forward like any other POST; the GET side of
/// these paths lives in the view routes.
pub fn submit_routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(submit::submit))
        .route("/message", post(submit::submit))
}

/// Catch-all for paths without an explicit route: POSTs are forwarded
/// to the collector, everything else is a static asset lookup.
pub async fn dispatch(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    match method {
        Method::POST => submit::forward(&state, &body).await,
        Method::GET | Method::HEAD => assets::serve(&state, uri.path()).await.into_response(),
        _ => AppError::BadRequest(format!("unsupported method {method}")).into_response(),
    }
}
