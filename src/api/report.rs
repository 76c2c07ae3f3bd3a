use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::AppState;
use crate::report::{Charts, TradeRow};

/// Aggregate statistics, or `{}` when there are no completed trades.
pub async fn get_stats(State(state): State<AppState>) -> Json<Value> {
    let session = state.session().await;
    let body = match &session.dashboard().stats {
        Some(stats) => json!(stats),
        None => json!({}),
    };
    Json(body)
}

/// Table rows, newest first.
pub async fn get_table(State(state): State<AppState>) -> Json<Vec<TradeRow>> {
    let session = state.session().await;
    Json(session.dashboard().rows.clone())
}

pub async fn get_charts(State(state): State<AppState>) -> Json<Charts> {
    let session = state.session().await;
    Json(session.dashboard().charts.clone())
}
