use axum::{extract::State, response::IntoResponse, Json};
use corridor_core::FeedResult;
use serde_json::json;
use std::sync::Arc;

use crate::AppState;

/// Always 200: failures are reported inside the body as a `cached` feed.
pub async fn get_news(State(state): State<Arc<AppState>>) -> Json<FeedResult> {
    let feed = state.aggregator.fetch_feed().await;
    tracing::debug!(
        "📤 Serving {} articles ({:?})",
        feed.articles.len(),
        feed.source
    );
    Json(feed)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
