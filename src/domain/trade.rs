//! Completed trade produced by reconciliation.

use crate::domain::{Decimal, Leverage, Market, RawEvent, Side};
use serde::{Deserialize, Serialize};

/// A priced Close event paired with its inferred Open (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTrade {
    pub date: String,
    pub time: String,
    pub market: Market,
    pub side: Side,
    pub leverage: Leverage,
    pub size: Decimal,
    pub size_usd: Decimal,
    pub collateral: Decimal,
    /// Price of the matched Open event; `None` for a standalone Close.
    pub entry_price: Option<Decimal>,
    pub close_price: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Option<f64>,
    /// `pnl / collateral * 100`. Non-finite when collateral is zero;
    /// serializes as `null` in that case.
    pub return_on_collateral: f64,
}

impl CompletedTrade {
    /// Build a trade from a Close event. Returns `None` if the event is not
    /// a priced Close.
    pub fn from_close(close: &RawEvent, entry_price: Option<Decimal>) -> Option<Self> {
        if !close.is_close() {
            return None;
        }
        let pnl = close.pnl?;
        Some(CompletedTrade {
            date: close.date.clone(),
            time: close.time.clone(),
            market: close.market.clone(),
            side: close.side.clone(),
            leverage: close.leverage.clone(),
            size: close.size,
            size_usd: close.size_usd,
            collateral: close.collateral,
            entry_price,
            close_price: close.close_price,
            pnl,
            pnl_percent: close.pnl_percent,
            return_on_collateral: return_on_collateral(pnl, close.collateral),
        })
    }

    pub fn is_matched(&self) -> bool {
        self.entry_price.is_some()
    }

    /// Return for display purposes: `None` when non-finite.
    pub fn finite_return(&self) -> Option<f64> {
        Some(self.return_on_collateral).filter(|r| r.is_finite())
    }
}

/// `pnl / collateral * 100`, unguarded.
pub fn return_on_collateral(pnl: Decimal, collateral: Decimal) -> f64 {
    pnl.to_f64() / collateral.to_f64() * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperationType;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn close(pnl: Option<&str>, collateral: &str) -> RawEvent {
        RawEvent {
            market: Market::new("ETH/USD".to_string()),
            side: Side::Short,
            operation_type: OperationType::Close,
            collateral: d(collateral),
            pnl: pnl.map(d),
            ..RawEvent::default()
        }
    }

    #[test]
    fn test_return_on_collateral() {
        let trade = CompletedTrade::from_close(&close(Some("-32032.87"), "136794.50"), None)
            .unwrap();
        assert!((trade.return_on_collateral - -23.4167).abs() < 1e-3);
        assert!(!trade.is_matched());
    }

    #[test]
    fn test_zero_collateral_passes_non_finite_through() {
        let trade = CompletedTrade::from_close(&close(Some("10"), "0"), None).unwrap();
        assert!(trade.return_on_collateral.is_infinite());
        assert_eq!(trade.finite_return(), None);

        let flat = CompletedTrade::from_close(&close(Some("0"), "0"), None).unwrap();
        assert!(flat.return_on_collateral.is_nan());

        let json = serde_json::to_value(&flat).unwrap();
        assert!(json["returnOnCollateral"].is_null());
    }

    #[test]
    fn test_unpriced_close_is_not_a_trade() {
        assert!(CompletedTrade::from_close(&close(None, "100"), None).is_none());
    }

    #[test]
    fn test_open_is_not_a_trade() {
        let mut open = close(Some("1"), "100");
        open.operation_type = OperationType::Open;
        assert!(CompletedTrade::from_close(&open, None).is_none());
    }
}
