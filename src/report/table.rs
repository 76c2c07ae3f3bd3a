use crate::domain::{CompletedTrade, Decimal};
use serde::Serialize;

/// Colouring hint for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// One display row of the trades table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRow {
    pub date_time: String,
    pub market: String,
    pub side: String,
    pub side_tone: Tone,
    pub size_usd: String,
    pub collateral: String,
    pub entry_price: String,
    pub close_price: String,
    pub pnl: String,
    pub pnl_tone: Tone,
    pub return_pct: String,
    pub return_tone: Tone,
}

pub const ABSENT: &str = "-";

impl TradeRow {
    pub fn from_trade(trade: &CompletedTrade) -> Self {
        let (return_pct, return_tone) = match trade.finite_return() {
            Some(r) => (format!("{:.2}%", r), tone_f64(r)),
            None => (ABSENT.to_string(), Tone::Neutral),
        };

        TradeRow {
            date_time: format!("{} {}", trade.date, trade.time),
            market: trade.market.to_string(),
            side: format!("{} {}", trade.side, trade.leverage),
            side_tone: if trade.side.is_long() {
                Tone::Positive
            } else {
                Tone::Negative
            },
            size_usd: format_amount(trade.size_usd),
            collateral: format_amount(trade.collateral),
            entry_price: trade
                .entry_price
                .filter(|px| !px.is_zero())
                .map(format_amount)
                .unwrap_or_else(|| ABSENT.to_string()),
            close_price: format_amount(trade.close_price),
            pnl: format_amount(trade.pnl),
            pnl_tone: if trade.pnl.is_positive() {
                Tone::Positive
            } else {
                Tone::Negative
            },
            return_pct,
            return_tone,
        }
    }
}

fn tone_f64(value: f64) -> Tone {
    if value > 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

/// Two decimals with thousands separators: 683973 -> "683,973.00".
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_negative();
    let text = format!("{:.2}", rounded.abs().inner());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}
