//! Canonical trading-history event.

use crate::domain::{Decimal, Leverage, Market, OperationType, Side};
use serde::{Deserialize, Serialize};

/// One row of trading history after normalization.
///
/// Open events never carry `pnl`; a Close event without `pnl` was not fully
/// priced and is not reportable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Day/month token, e.g. "23/04".
    pub date: String,
    /// Hour:minute token, e.g. "12:28".
    pub time: String,
    pub market: Market,
    pub side: Side,
    pub leverage: Leverage,
    /// Position size in base-asset units.
    pub size: Decimal,
    /// Position notional in quote currency.
    pub size_usd: Decimal,
    /// Margin posted for the position.
    pub collateral: Decimal,
    pub operation_type: OperationType,
    /// Execution price of this event.
    pub close_price: Decimal,
    pub pnl: Option<Decimal>,
    pub pnl_percent: Option<f64>,
}

impl RawEvent {
    pub fn is_open(&self) -> bool {
        self.operation_type == OperationType::Open
    }

    pub fn is_close(&self) -> bool {
        self.operation_type == OperationType::Close
    }

    /// A Close event that carries realized pnl.
    pub fn is_priced_close(&self) -> bool {
        self.is_close() && self.pnl.is_some()
    }
}

impl Default for RawEvent {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            market: Market::default(),
            side: Side::Other(String::new()),
            leverage: Leverage::default(),
            size: Decimal::zero(),
            size_usd: Decimal::zero(),
            collateral: Decimal::zero(),
            operation_type: OperationType::Other(String::new()),
            close_price: Decimal::zero(),
            pnl: None,
            pnl_percent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_camel_case() {
        let event = RawEvent {
            date: "22/04".to_string(),
            time: "14:06".to_string(),
            market: Market::new("ETH/USD".to_string()),
            side: Side::Short,
            leverage: Leverage::new("5.0x".to_string()),
            operation_type: OperationType::Open,
            close_price: Decimal::from_str_canonical("1707.55").unwrap(),
            ..RawEvent::default()
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["operationType"], "Open");
        assert_eq!(json["side"], "Short");
        assert_eq!(json["market"], "ETH/USD");
        assert_eq!(json["closePrice"].as_f64(), Some(1707.55));
        assert!(json["pnl"].is_null());
        assert!(json.get("sizeUsd").is_some());
    }

    #[test]
    fn test_priced_close() {
        let mut event = RawEvent {
            operation_type: OperationType::Close,
            ..RawEvent::default()
        };
        assert!(!event.is_priced_close());
        event.pnl = Some(Decimal::zero());
        assert!(event.is_priced_close());
    }
}
