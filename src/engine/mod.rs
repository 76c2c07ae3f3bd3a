//! Pure computation engine: trade reconciliation and statistics.

use crate::domain::{CompletedTrade, RawEvent};

pub mod fifo;
pub mod reconcile;
pub mod stats;

pub use fifo::reconcile_fifo;
pub use reconcile::{reconcile_heuristic, OpenBook, OpenKey};
pub use stats::TradeStats;

/// Strategy used to pair Close events with Open events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matcher {
    /// First open entry with the same market and side, timestamps ignored.
    #[default]
    Heuristic,
    /// Chronological FIFO lots with size-aware partial fills.
    Fifo { calendar_year: i32 },
}

impl Matcher {
    /// Run one reconciliation pass. Output follows the input order of the
    /// priced Close events.
    pub fn reconcile(&self, events: &[RawEvent]) -> Vec<CompletedTrade> {
        match self {
            Matcher::Heuristic => reconcile_heuristic(events),
            Matcher::Fifo { calendar_year } => reconcile_fifo(events, *calendar_year),
        }
    }
}
