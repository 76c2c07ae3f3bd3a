//! Event normalizer: loosely-typed records to canonical [`RawEvent`]s.
//!
//! Records come from JSON imports (already close to the canonical shape) or
//! from the table adapter (`price` instead of `closePrice`, no `sizeUsd`).
//! Normalization never fails: every record yields exactly one event, with
//! missing or malformed fields replaced by defaults.

use crate::domain::{Decimal, Leverage, Market, OperationType, RawEvent, Side};
use serde_json::{Map, Value};
use tracing::debug;

/// Normalize a batch of records. Output length always equals input length.
pub fn normalize(records: &[Value]) -> Vec<RawEvent> {
    let mut defaulted = 0usize;
    let events: Vec<RawEvent> = records
        .iter()
        .map(|record| match record.as_object() {
            Some(obj) => normalize_record(obj),
            None => {
                defaulted += 1;
                RawEvent::default()
            }
        })
        .collect();

    debug!(
        records = records.len(),
        non_objects = defaulted,
        "Normalized trade records"
    );
    events
}

/// Normalize a single JSON object.
pub fn normalize_record(obj: &Map<String, Value>) -> RawEvent {
    let operation_type = OperationType::from(string_field(obj, "operationType"));
    let size = number_field(obj, "size");
    let size_usd = match number_or_none(obj.get("sizeUsd")) {
        Some(v) if !v.is_zero() => v,
        _ => size,
    };
    let collateral = number_field(obj, "collateral");
    let close_price = match number_or_none(obj.get("closePrice")) {
        Some(v) if !v.is_zero() => v,
        _ => number_field(obj, "price"),
    };

    let pnl = if operation_type == OperationType::Open {
        None
    } else {
        match obj.get("pnl") {
            Some(Value::Null) => None,
            other => Some(number_or_none(other).unwrap_or_else(Decimal::zero)),
        }
    };

    let pnl_percent = obj
        .get("pnlPercent")
        .and_then(value_as_f64)
        .or_else(|| derive_pnl_percent(pnl, collateral));

    let leverage = match string_field(obj, "leverage") {
        s if s.is_empty() => Leverage::default(),
        s => Leverage::new(s),
    };

    RawEvent {
        date: string_field(obj, "date"),
        time: string_field(obj, "time"),
        market: Market::new(string_field(obj, "market")),
        side: Side::from(string_field(obj, "side")),
        leverage,
        size,
        size_usd,
        collateral,
        operation_type,
        close_price,
        pnl,
        pnl_percent,
    }
}

fn derive_pnl_percent(pnl: Option<Decimal>, collateral: Decimal) -> Option<f64> {
    match pnl {
        Some(p) if !p.is_zero() && !collateral.is_zero() => {
            Some(p.to_f64() / collateral.to_f64() * 100.0)
        }
        _ => None,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Numeric field with zero as the fallback.
fn number_field(obj: &Map<String, Value>, key: &str) -> Decimal {
    number_or_none(obj.get(key)).unwrap_or_else(Decimal::zero)
}

fn number_or_none(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => Decimal::from_json_number(n),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_number(s).map(|d| d.to_f64()),
        _ => None,
    }
}

/// Read the longest numeric prefix of `s` ("5.0x" -> 5.0, " -12.5 USDC" -> -12.5).
pub fn parse_leading_number(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        } else if digits > 0 {
            end = frac_start;
        }
    }

    if digits == 0 {
        return None;
    }

    let text = s[..end].trim_end_matches('.').trim_start_matches('+');
    let text = match text.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{}", rest),
        _ if text.starts_with('.') => format!("0{}", text),
        _ => text.to_string(),
    };
    Decimal::from_str_canonical(&text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("5.0x"), Some(d("5.0")));
        assert_eq!(parse_leading_number("  -12.5 USDC"), Some(d("-12.5")));
        assert_eq!(parse_leading_number("+3"), Some(d("3")));
        assert_eq!(parse_leading_number("7."), Some(d("7")));
        assert_eq!(parse_leading_number(".5"), Some(d("0.5")));
        assert_eq!(parse_leading_number("1,234.5"), Some(d("1")));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn test_canonical_record() {
        let record = json!({
            "date": "23/04",
            "time": "12:28",
            "market": "ETH/USD",
            "side": "Short",
            "leverage": "5.0x",
            "size": 400.558,
            "sizeUsd": 683973,
            "collateral": 136794.50,
            "operationType": "Close",
            "closePrice": 1789.19,
            "pnl": -32032.87,
            "pnlPercent": -23.42
        });

        let events = normalize(&[record]);
        let e = &events[0];
        assert_eq!(e.date, "23/04");
        assert_eq!(e.market.as_str(), "ETH/USD");
        assert_eq!(e.side, Side::Short);
        assert_eq!(e.leverage.as_str(), "5.0x");
        assert_eq!(e.size, d("400.558"));
        assert_eq!(e.size_usd, d("683973"));
        assert_eq!(e.collateral, d("136794.5"));
        assert_eq!(e.operation_type, OperationType::Close);
        assert_eq!(e.close_price, d("1789.19"));
        assert_eq!(e.pnl, Some(d("-32032.87")));
        assert_eq!(e.pnl_percent, Some(-23.42));
    }

    #[test]
    fn test_scraper_record_uses_price_and_size() {
        let record = json!({
            "date": "22/04",
            "time": "12:44",
            "market": "SOL/USD",
            "side": "Short",
            "leverage": "39.0x",
            "size": 15473.1,
            "collateral": 57600,
            "operationType": "Close",
            "price": 144.708,
            "pnl": 9643.72
        });

        let e = &normalize(&[record])[0];
        assert_eq!(e.close_price, d("144.708"));
        assert_eq!(e.size_usd, d("15473.1"));
        let pct = e.pnl_percent.unwrap();
        assert!((pct - 9643.72 / 57600.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let e = &normalize(&[json!({})])[0];
        assert_eq!(e.date, "");
        assert_eq!(e.time, "");
        assert_eq!(e.market.as_str(), "");
        assert_eq!(e.side.as_str(), "");
        assert_eq!(e.leverage.as_str(), "0x");
        assert_eq!(e.size, Decimal::zero());
        assert_eq!(e.collateral, Decimal::zero());
        assert_eq!(e.close_price, Decimal::zero());
        assert_eq!(e.operation_type.as_str(), "");
        // Missing pnl on a non-Open event coerces to zero.
        assert_eq!(e.pnl, Some(Decimal::zero()));
        assert_eq!(e.pnl_percent, None);
    }

    #[test]
    fn test_explicit_null_pnl_stays_absent() {
        let e = &normalize(&[json!({"operationType": "Close", "pnl": null})])[0];
        assert_eq!(e.pnl, None);
    }

    #[test]
    fn test_open_never_carries_pnl() {
        let e = &normalize(&[json!({"operationType": "Open", "pnl": 125.0})])[0];
        assert_eq!(e.pnl, None);
        assert_eq!(e.pnl_percent, None);
    }

    #[test]
    fn test_non_numeric_values_coerce_to_zero() {
        let record = json!({
            "operationType": "Close",
            "size": "lots",
            "collateral": true,
            "closePrice": {"nested": 1},
            "pnl": "n/a"
        });
        let e = &normalize(&[record])[0];
        assert_eq!(e.size, Decimal::zero());
        assert_eq!(e.collateral, Decimal::zero());
        assert_eq!(e.close_price, Decimal::zero());
        assert_eq!(e.pnl, Some(Decimal::zero()));
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let record = json!({
            "operationType": "Close",
            "size": "12.5",
            "collateral": "100",
            "pnl": "-25"
        });
        let e = &normalize(&[record])[0];
        assert_eq!(e.size, d("12.5"));
        assert_eq!(e.pnl, Some(d("-25")));
        assert_eq!(e.pnl_percent, Some(-25.0));
    }

    #[test]
    fn test_unknown_operation_passes_through() {
        let e = &normalize(&[json!({"operationType": "Cancelled", "side": "Unknown"})])[0];
        assert_eq!(e.operation_type.as_str(), "Cancelled");
        assert_eq!(e.side.as_str(), "Unknown");
    }

    #[test]
    fn test_non_object_records_keep_length() {
        let records = vec![json!(42), json!("row"), json!(null), json!([1, 2])];
        let events = normalize(&records);
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.pnl.is_none()));
    }

    #[test]
    fn test_pnl_percent_not_derived_from_zero_collateral() {
        let e = &normalize(&[json!({"operationType": "Close", "pnl": 10})])[0];
        assert_eq!(e.pnl, Some(d("10")));
        assert_eq!(e.pnl_percent, None);
    }
}
