//! Domain primitives: Market, Side, OperationType, Leverage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument identifier (e.g., "ETH/USD").
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Market(pub String);

impl Market {
    pub fn new(market: String) -> Self {
        Market(market)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directional stance of a position.
///
/// Tokens other than long/short (including the empty string) are carried
/// verbatim in `Other` so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Side {
    Long,
    Short,
    Other(String),
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Side::Long => "Long",
            Side::Short => "Short",
            Side::Other(raw) => raw,
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Side::Long)
    }
}

impl From<&str> for Side {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Side::Long,
            "short" => Side::Short,
            _ => Side::Other(s.to_string()),
        }
    }
}

impl From<String> for Side {
    fn from(s: String) -> Self {
        Side::from(s.as_str())
    }
}

impl From<Side> for String {
    fn from(side: Side) -> Self {
        side.as_str().to_string()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle tag of an event. Only `Open` and `Close` take part in
/// reconciliation; anything else is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationType {
    Open,
    Close,
    Other(String),
}

impl OperationType {
    pub fn as_str(&self) -> &str {
        match self {
            OperationType::Open => "Open",
            OperationType::Close => "Close",
            OperationType::Other(raw) => raw,
        }
    }
}

impl From<&str> for OperationType {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => OperationType::Open,
            "close" => OperationType::Close,
            _ => OperationType::Other(s.to_string()),
        }
    }
}

impl From<String> for OperationType {
    fn from(s: String) -> Self {
        OperationType::from(s.as_str())
    }
}

impl From<OperationType> for String {
    fn from(op: OperationType) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leverage as displayed by the venue, e.g. "5.0x".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leverage(pub String);

impl Leverage {
    pub fn new(leverage: String) -> Self {
        Leverage(leverage)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric multiplier, if the text starts with a number.
    pub fn multiplier(&self) -> Option<f64> {
        let text = self.0.trim().trim_end_matches(['x', 'X']);
        text.parse::<f64>().ok()
    }
}

impl Default for Leverage {
    fn default() -> Self {
        Leverage("0x".to_string())
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse_case_insensitive() {
        assert_eq!(Side::from("Short"), Side::Short);
        assert_eq!(Side::from("LONG"), Side::Long);
        assert_eq!(Side::from(""), Side::Other(String::new()));
        assert_eq!(Side::from("Unknown"), Side::Other("Unknown".to_string()));
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Short).unwrap(), "\"Short\"");
        let other: Side = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(other.as_str(), "Unknown");
    }

    #[test]
    fn test_operation_type_passthrough() {
        assert_eq!(OperationType::from("Open"), OperationType::Open);
        assert_eq!(OperationType::from("Close"), OperationType::Close);
        let cancelled = OperationType::from("Cancelled");
        assert_eq!(cancelled.as_str(), "Cancelled");
        assert_eq!(
            serde_json::to_string(&cancelled).unwrap(),
            "\"Cancelled\""
        );
    }

    #[test]
    fn test_leverage_multiplier() {
        assert_eq!(Leverage::new("5.0x".to_string()).multiplier(), Some(5.0));
        assert_eq!(Leverage::default().multiplier(), Some(0.0));
        assert_eq!(Leverage::new("n/a".to_string()).multiplier(), None);
    }

    #[test]
    fn test_market_display() {
        assert_eq!(Market::new("ETH/USD".to_string()).to_string(), "ETH/USD");
    }
}
