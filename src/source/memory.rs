//! In-memory source, including the built-in sample dataset.

use super::{EventSource, SourceError};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Serves a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Value>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: Value) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_records(mut self, records: Vec<Value>) -> Self {
        self.records.extend(records);
        self
    }

    /// Six hand-entered rows of venue history used when no dataset is
    /// configured.
    pub fn sample() -> Self {
        Self::new().with_records(sample_records())
    }
}

#[async_trait]
impl EventSource for StaticSource {
    async fn fetch_records(&self) -> Result<Vec<Value>, SourceError> {
        Ok(self.records.clone())
    }
}

pub fn sample_records() -> Vec<Value> {
    vec![
        json!({
            "date": "23/04", "time": "12:28", "market": "ETH/USD", "side": "Short",
            "leverage": "5.0x", "size": 400.558, "sizeUsd": 683973, "collateral": 136794.50,
            "operationType": "Close", "closePrice": 1789.19, "pnl": -32032.87, "pnlPercent": -23.42
        }),
        json!({
            "date": "22/04", "time": "14:06", "market": "ETH/USD", "side": "Short",
            "leverage": "5.0x", "size": 400.558, "sizeUsd": 683973, "collateral": 136794.50,
            "operationType": "Open", "closePrice": 1707.55, "pnl": null, "pnlPercent": null
        }),
        json!({
            "date": "22/04", "time": "12:44", "market": "SOL/USD", "side": "Short",
            "leverage": "39.0x", "size": 15473.1, "sizeUsd": 2245740, "collateral": 57600.00,
            "operationType": "Close", "closePrice": 144.708, "pnl": 9643.72, "pnlPercent": 16.73
        }),
        json!({
            "date": "22/04", "time": "12:44", "market": "SOL/USD", "side": "Short",
            "leverage": "39.0x", "size": 15480.5, "sizeUsd": 2248740, "collateral": 57600.00,
            "operationType": "Close", "closePrice": 144.759, "pnl": 7792.43, "pnlPercent": 13.51
        }),
        json!({
            "date": "22/04", "time": "12:42", "market": "SOL/USD", "side": "Short",
            "leverage": "37.0x", "size": 14725.2, "sizeUsd": 2137860, "collateral": 57780.00,
            "operationType": "Close", "closePrice": 144.792, "pnl": 5772.33, "pnlPercent": 9.99
        }),
        json!({
            "date": "22/04", "time": "12:42", "market": "SOL/USD", "side": "Short",
            "leverage": "37.0x", "size": 14725.2, "sizeUsd": 2137860, "collateral": 57780.00,
            "operationType": "Open", "closePrice": 145.184, "pnl": null, "pnlPercent": null
        }),
    ]
}
