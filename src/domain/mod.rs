//! Domain types for trading-history reconciliation.
//!
//! This module provides:
//! - Exact amounts via the Decimal wrapper
//! - Domain primitives: Market, Side, OperationType, Leverage
//! - The canonical RawEvent and the derived CompletedTrade
//! - Chronological ordering from the venue's day/month + time tokens

pub mod decimal;
pub mod event;
pub mod primitives;
pub mod time;
pub mod trade;

pub use decimal::Decimal;
pub use event::RawEvent;
pub use primitives::{Leverage, Market, OperationType, Side};
pub use time::{sort_by_event_time, EventTime};
pub use trade::{return_on_collateral, CompletedTrade};
