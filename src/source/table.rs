//! Adapter for a CSV dump of the venue's trade-history table.
//!
//! Columns are not fixed, so fields are located heuristically from the cell
//! text the same way a reader scanning the table would: the market/side
//! cell, the first cell with a thousands separator for size, the cell
//! quoting USDC for collateral, and so on.

use super::{EventSource, SourceError};
use crate::normalize::parse_leading_number;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

const HEADER_MARKER: &str = "Market & Side";
const MIN_CELLS: usize = 6;
/// Cells 0 and 1 hold date/time and market/side.
const FIRST_VALUE_CELL: usize = 2;

#[derive(Debug, Clone)]
pub struct CsvTableSource {
    path: PathBuf,
}

impl CsvTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Extract trade records from table rows. Rows up to and including the
    /// header row are skipped, as are rows with too few cells.
    pub fn extract<R: Read>(reader: R) -> Result<Vec<Value>, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut header_found = false;
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in reader.records() {
            let row = row?;
            let cells: Vec<&str> = row.iter().map(str::trim).collect();

            if !header_found {
                header_found = cells.iter().any(|c| c.contains(HEADER_MARKER));
                continue;
            }
            if cells.len() < MIN_CELLS {
                skipped += 1;
                continue;
            }

            match extract_row(&cells) {
                Some(record) => records.push(record),
                None => {
                    warn!(row = ?cells, "Skipping table row without a date");
                    skipped += 1;
                }
            }
        }

        if !header_found {
            warn!("No trade table header found");
        }
        debug!(records = records.len(), skipped, "Extracted table rows");
        Ok(records)
    }
}

#[async_trait]
impl EventSource for CsvTableSource {
    async fn fetch_records(&self) -> Result<Vec<Value>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Self::extract(bytes.as_slice())
    }
}

fn extract_row(cells: &[&str]) -> Option<Value> {
    let mut date_time = cells[0].split_whitespace();
    let date = date_time.next()?;
    let time = date_time.next().unwrap_or("");

    let market_side = cells[1];
    let market = find_market(market_side).unwrap_or_else(|| "Unknown".to_string());
    let (side, leverage) = find_side_leverage(market_side)
        .unwrap_or_else(|| ("Unknown".to_string(), "0x".to_string()));

    let value_cells = &cells[FIRST_VALUE_CELL..];

    let size_idx = value_cells.iter().position(|c| c.contains(','));
    let size = size_idx.and_then(|i| parse_amount(value_cells[i]));

    let collateral_idx = value_cells.iter().position(|c| c.contains("USDC"));
    let collateral =
        collateral_idx.and_then(|i| parse_amount(&value_cells[i].replace("USDC", "")));

    let operation_idx = value_cells
        .iter()
        .position(|c| ["Open", "Close", "Cancelled"].iter().any(|op| c.contains(op)));
    let operation_type = match operation_idx.map(|i| value_cells[i]) {
        Some(c) if c.contains("Open") => "Open",
        Some(c) if c.contains("Close") => "Close",
        _ => "Unknown",
    };

    // Price is the first remaining numeric cell that is not a currency amount.
    let claimed = [size_idx, collateral_idx, operation_idx];
    let price = value_cells
        .iter()
        .enumerate()
        .filter(|(i, _)| !claimed.contains(&Some(*i)))
        .filter(|(_, c)| !c.contains("USDC") && !c.contains('$'))
        .find_map(|(_, c)| parse_amount(c));

    let pnl = if operation_type == "Close" {
        value_cells
            .iter()
            .find(|c| c.contains('+') || c.contains('-'))
            .map(|c| parse_signed_pnl(c))
    } else {
        None
    };

    Some(json!({
        "date": date,
        "time": time,
        "market": market,
        "side": side,
        "leverage": leverage,
        "size": size.unwrap_or(0.0),
        "collateral": collateral.unwrap_or(0.0),
        "operationType": operation_type,
        "price": price.unwrap_or(0.0),
        "pnl": pnl,
    }))
}

/// Number with thousands separators removed.
fn parse_amount(text: &str) -> Option<f64> {
    parse_leading_number(&text.replace(',', "")).map(|d| d.to_f64())
}

/// "+$1,234.50" -> 1234.5, "-$987.65" -> -987.65. Unparseable -> 0.
fn parse_signed_pnl(text: &str) -> f64 {
    let negative = text.contains('-');
    let cleaned: String = text
        .chars()
        .filter(|ch| !matches!(ch, '+' | '-' | '$' | ','))
        .collect();
    let magnitude = parse_leading_number(cleaned.trim())
        .map(|d| d.to_f64())
        .unwrap_or(0.0);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// First "<LETTERS>/USD" token, upper-cased.
fn find_market(text: &str) -> Option<String> {
    let upper = text.to_ascii_uppercase();
    let idx = upper.find("/USD")?;
    let base_start = upper[..idx]
        .char_indices()
        .rev()
        .take_while(|(_, ch)| ch.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i)?;
    Some(upper[base_start..idx + 4].to_string())
}

/// "Short 5.0x" -> ("Short", "5.0x").
fn find_side_leverage(text: &str) -> Option<(String, String)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.windows(2).find_map(|pair| {
        let side = match pair[0].to_ascii_lowercase().as_str() {
            "long" => "Long",
            "short" => "Short",
            _ => return None,
        };
        is_leverage_token(pair[1]).then(|| (side.to_string(), pair[1].to_string()))
    })
}

fn is_leverage_token(token: &str) -> bool {
    let Some(number) = token.strip_suffix(['x', 'X']) else {
        return false;
    };
    match number.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
