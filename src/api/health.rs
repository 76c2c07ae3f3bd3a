use axum::extract::State;
use axum::Json;

use super::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let session = state.session().await;
    Json(serde_json::json!({
        "status": "ready",
        "events": session.events().len(),
    }))
}
