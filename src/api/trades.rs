use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::AppState;
use crate::domain::CompletedTrade;
use crate::error::AppError;
use crate::report::sort_chronological;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TradeOrder {
    Input,
    Chronological,
}

impl FromStr for TradeOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(TradeOrder::Input),
            "chronological" => Ok(TradeOrder::Chronological),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesQuery {
    pub market: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradesResponse {
    pub trades: Vec<CompletedTrade>,
    pub unmatched: usize,
}

pub async fn get_trades(
    Query(params): Query<TradesQuery>,
    State(state): State<AppState>,
) -> Result<Json<TradesResponse>, AppError> {
    let order = match params.order.as_deref() {
        None | Some("") => TradeOrder::Input,
        Some(s) => TradeOrder::from_str(s).map_err(|_| {
            AppError::BadRequest("order must be one of: input, chronological".to_string())
        })?,
    };
    let market = params
        .market
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let session = state.session().await;
    let all = &session.dashboard().trades;

    let ordered: Vec<&CompletedTrade> = match order {
        TradeOrder::Input => all.iter().collect(),
        TradeOrder::Chronological => sort_chronological(all, state.config.calendar_year),
    };

    let trades: Vec<CompletedTrade> = ordered
        .into_iter()
        .filter(|t| market.map_or(true, |m| t.market.as_str().eq_ignore_ascii_case(m)))
        .cloned()
        .collect();
    let unmatched = trades.iter().filter(|t| !t.is_matched()).count();

    Ok(Json(TradesResponse { trades, unmatched }))
}
