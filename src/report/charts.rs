use crate::domain::{CompletedTrade, Decimal};
use serde::Serialize;

/// Labelled numeric series for a bar or line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Per-trade return bars, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnsChart {
    #[serde(flatten)]
    pub series: Series,
    /// Tooltip titles, "market side".
    pub titles: Vec<String>,
}

/// Trade count per market with percentage share.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDistribution {
    pub markets: Vec<String>,
    pub counts: Vec<usize>,
    pub share_pct: Vec<f64>,
}

/// Summed pnl per market.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlByMarket {
    pub markets: Vec<String>,
    pub pnl: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub returns: ReturnsChart,
    pub cumulative: Series,
    pub market_distribution: MarketDistribution,
    pub pnl_by_market: PnlByMarket,
}

impl Charts {
    /// `chronological` must already be sorted oldest first; `trades` is used
    /// as-is for the per-market aggregates.
    pub fn build(chronological: &[&CompletedTrade], trades: &[CompletedTrade]) -> Self {
        let returns = returns_chart(chronological);
        let cumulative = cumulative_series(&returns.series);
        Charts {
            returns,
            cumulative,
            market_distribution: market_distribution(trades),
            pnl_by_market: pnl_by_market(trades),
        }
    }
}

fn label(trade: &CompletedTrade) -> String {
    format!("{} {}", trade.date, trade.time)
}

/// NaN reads as zero; infinities are kept.
fn chart_return(trade: &CompletedTrade) -> f64 {
    if trade.return_on_collateral.is_nan() {
        0.0
    } else {
        trade.return_on_collateral
    }
}

pub fn returns_chart(chronological: &[&CompletedTrade]) -> ReturnsChart {
    ReturnsChart {
        series: Series {
            labels: chronological.iter().map(|t| label(t)).collect(),
            values: chronological.iter().map(|t| chart_return(t)).collect(),
        },
        titles: chronological
            .iter()
            .map(|t| format!("{} {}", t.market, t.side))
            .collect(),
    }
}

pub fn cumulative_series(returns: &Series) -> Series {
    let values = returns
        .values
        .iter()
        .scan(0.0, |acc, r| {
            *acc += r;
            Some(*acc)
        })
        .collect();
    Series {
        labels: returns.labels.clone(),
        values,
    }
}

/// Groups by market in first-seen order.
fn group_by_market<T, F>(trades: &[CompletedTrade], init: T, mut fold: F) -> (Vec<String>, Vec<T>)
where
    T: Clone,
    F: FnMut(&mut T, &CompletedTrade),
{
    let mut markets: Vec<String> = Vec::new();
    let mut acc: Vec<T> = Vec::new();
    for trade in trades {
        let idx = match markets.iter().position(|m| m == trade.market.as_str()) {
            Some(idx) => idx,
            None => {
                markets.push(trade.market.to_string());
                acc.push(init.clone());
                markets.len() - 1
            }
        };
        fold(&mut acc[idx], trade);
    }
    (markets, acc)
}

pub fn market_distribution(trades: &[CompletedTrade]) -> MarketDistribution {
    let (markets, counts) = group_by_market(trades, 0usize, |count, _| *count += 1);
    let total: usize = counts.iter().sum();
    let share_pct = counts
        .iter()
        .map(|&c| c as f64 / total as f64 * 100.0)
        .collect();
    MarketDistribution {
        markets,
        counts,
        share_pct,
    }
}

pub fn pnl_by_market(trades: &[CompletedTrade]) -> PnlByMarket {
    let (markets, pnl) = group_by_market(trades, Decimal::zero(), |sum, trade| {
        *sum = *sum + trade.pnl
    });
    PnlByMarket { markets, pnl }
}
