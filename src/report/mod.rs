//! Presentation data derived from completed trades.
//!
//! Everything here is a pure function of the engine output. A render pass
//! produces a fresh [`Dashboard`] that replaces the previous one wholesale.

use crate::domain::{sort_by_event_time, CompletedTrade, RawEvent};
use crate::engine::{Matcher, TradeStats};
use serde::Serialize;

pub mod charts;
pub mod table;

pub use charts::{Charts, MarketDistribution, PnlByMarket, ReturnsChart, Series};
pub use table::{format_amount, Tone, TradeRow};

/// Trades sorted oldest first; ties keep engine order.
pub fn sort_chronological(trades: &[CompletedTrade], calendar_year: i32) -> Vec<&CompletedTrade> {
    let mut sorted: Vec<&CompletedTrade> = trades.iter().collect();
    sort_by_event_time(&mut sorted, calendar_year, |t| (t.date.as_str(), t.time.as_str()));
    sorted
}

/// Table rows, newest first.
pub fn table_rows(trades: &[CompletedTrade], calendar_year: i32) -> Vec<TradeRow> {
    sort_chronological(trades, calendar_year)
        .into_iter()
        .rev()
        .map(TradeRow::from_trade)
        .collect()
}

/// Everything one render cycle produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub trades: Vec<CompletedTrade>,
    pub stats: Option<TradeStats>,
    pub rows: Vec<TradeRow>,
    pub charts: Charts,
}

impl Dashboard {
    pub fn render(events: &[RawEvent], matcher: Matcher, calendar_year: i32) -> Self {
        let trades = matcher.reconcile(events);
        let stats = TradeStats::calculate(&trades);
        let rows = table_rows(&trades, calendar_year);
        let charts = {
            let chronological = sort_chronological(&trades, calendar_year);
            Charts::build(&chronological, &trades)
        };

        Dashboard {
            trades,
            stats,
            rows,
            charts,
        }
    }
}
