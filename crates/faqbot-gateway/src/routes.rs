//! API route handlers for the gateway.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Html,
};
use faqbot_core::Reply;
use std::sync::Arc;
use tokio::task::JoinError;

use super::server::AppState;

const FALLBACK_INDEX: &str = "<h3>Chatbot backend is running. POST to /api/message</h3>";

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Corpus questions in insertion order, for populating the frontend.
pub async fn list_faqs(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let items: Vec<_> = state
        .matcher
        .entries()
        .iter()
        .enumerate()
        .map(|(i, e)| serde_json::json!({"id": i, "question": e.question}))
        .collect();
    Json(serde_json::Value::Array(items))
}

/// Extract `message` from a raw body. Anything unparsable counts as `{}`.
fn message_from_body(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_default()
}

/// Answer a user message.
pub async fn api_message(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<Reply>) {
    let message = message_from_body(&body);
    if message.trim().is_empty() {
        return (StatusCode::OK, Json(Reply::empty()));
    }

    let matcher = state.matcher.clone();
    reply_from_task(tokio::task::spawn_blocking(move || matcher.decide(&message)).await)
}

/// Map the ranking task outcome to a response. A panicked task becomes the 500 reply.
fn reply_from_task(result: Result<Reply, JoinError>) -> (StatusCode, Json<Reply>) {
    match result {
        Ok(reply) => {
            tracing::debug!(
                method = ?reply.method,
                score = reply.score,
                intent_id = ?reply.intent_id,
                "message answered"
            );
            (StatusCode::OK, Json(reply))
        }
        Err(e) => {
            tracing::error!("Unhandled error in /api/message: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Reply::server_error()))
        }
    }
}

/// Serve `<templates_dir>/index.html` when present.
pub async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let path = state.templates_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html),
        Err(_) => Html(FALLBACK_INDEX.to_string()),
    }
}
