use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::domain::RawEvent;

/// Current canonical events, in the same shape the import accepts.
pub async fn get_events(State(state): State<AppState>) -> Json<Vec<RawEvent>> {
    let session = state.session().await;
    Json(session.events().to_vec())
}
