pub mod config;
pub mod error;
pub mod state;
pub mod relay;
pub mod store;
pub mod models;
pub mod collector;
pub mod submission;
pub mod routes;
pub mod views;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Config;
use crate::relay::RelaySender;
use crate::state::{AppState, SharedState};

pub fn build_app(relay: RelaySender, config: Config) -> Router {
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState { relay, config });

    Router::new()
        .merge(views::view_routes())
        .merge(routes::submit_routes())
        .route(
            "/health",
            axum::routing::get(health).post(routes::submit::submit),
        )
        .fallback(routes::dispatch)
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
