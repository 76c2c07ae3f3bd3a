use crate::domain::{CompletedTrade, Decimal};
use serde::Serialize;

/// Summary statistics over a list of completed trades.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    pub trade_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_pnl: Decimal,
    /// Share of trades with positive pnl, in percent.
    pub win_rate: f64,
    /// Mean return on collateral; NaN returns count as zero.
    pub average_return_percent: f64,
    pub total_collateral: Decimal,
}

impl TradeStats {
    /// Returns `None` for an empty trade list.
    pub fn calculate(trades: &[CompletedTrade]) -> Option<Self> {
        if trades.is_empty() {
            return None;
        }

        let trade_count = trades.len();
        let winning_trades = trades.iter().filter(|t| t.pnl.is_positive()).count();
        let losing_trades = trades.iter().filter(|t| t.pnl.is_negative()).count();
        let total_pnl: Decimal = trades.iter().map(|t| t.pnl).sum();
        let total_collateral: Decimal = trades.iter().map(|t| t.collateral).sum();
        let total_return: f64 = trades
            .iter()
            .map(|t| t.return_on_collateral)
            .map(|r| if r.is_nan() { 0.0 } else { r })
            .sum();

        Some(TradeStats {
            trade_count,
            winning_trades,
            losing_trades,
            total_pnl,
            win_rate: winning_trades as f64 / trade_count as f64 * 100.0,
            average_return_percent: total_return / trade_count as f64,
            total_collateral,
        })
    }
}
