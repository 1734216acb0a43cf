use askama::Template;
use axum::response::Html;

use crate::error::AppError;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "message.html")]
struct MessageTemplate;

pub async fn index() -> Result<Html<String>, AppError> {
    let html = IndexTemplate
        .render()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Html(html))
}

pub async fn message() -> Result<Html<String>, AppError> {
    let html = MessageTemplate
        .render()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Html(html))
}
