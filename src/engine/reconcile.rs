use crate::domain::{CompletedTrade, Market, RawEvent, Side};
use std::collections::HashMap;
use tracing::debug;

/// Key of an Open event in the open book.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenKey {
    pub market: Market,
    pub side: Side,
    pub date: String,
    pub time: String,
}

impl OpenKey {
    pub fn from_event(event: &RawEvent) -> Self {
        Self {
            market: event.market.clone(),
            side: event.side.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
        }
    }

    fn matches(&self, market: &Market, side: &Side) -> bool {
        &self.market == market && &self.side == side
    }
}

/// Insertion-ordered table of open positions that have not been consumed.
///
/// Re-inserting an existing key replaces the event but keeps the slot's
/// original position. Lives for a single reconciliation pass.
#[derive(Debug, Default)]
pub struct OpenBook<'a> {
    slots: Vec<Option<(OpenKey, &'a RawEvent)>>,
    index: HashMap<OpenKey, usize>,
}

impl<'a> OpenBook<'a> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert an Open event (last write wins on key collision).
    pub fn insert(&mut self, event: &'a RawEvent) {
        let key = OpenKey::from_event(event);
        match self.index.get(&key) {
            Some(&slot) => self.slots[slot] = Some((key, event)),
            None => {
                self.index.insert(key.clone(), self.slots.len());
                self.slots.push(Some((key, event)));
            }
        }
    }

    /// Remove and return the first open entry for `(market, side)`, in
    /// insertion order, ignoring date and time.
    pub fn take_first(&mut self, market: &Market, side: &Side) -> Option<&'a RawEvent> {
        let slot = self.slots.iter_mut().find(|slot| {
            slot.as_ref()
                .map(|(key, _)| key.matches(market, side))
                .unwrap_or(false)
        })?;
        let (key, event) = slot.take()?;
        self.index.remove(&key);
        Some(event)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Pair priced Close events with Open events using the `(market, side)`
/// heuristic.
///
/// Every Open is registered first. Each priced Close, in input order, then
/// consumes the earliest-registered open entry with the same market and
/// side regardless of timestamps. A Close without a match is still emitted
/// with no entry price; a Close without pnl is dropped. Output order follows
/// the input order of the Close events.
pub fn reconcile_heuristic(events: &[RawEvent]) -> Vec<CompletedTrade> {
    let mut book = OpenBook::new();
    for event in events.iter().filter(|e| e.is_open()) {
        book.insert(event);
    }
    let opens = book.len();

    let mut unmatched = 0usize;
    let trades: Vec<CompletedTrade> = events
        .iter()
        .filter(|e| e.is_priced_close())
        .filter_map(|close| {
            let entry_price = book
                .take_first(&close.market, &close.side)
                .map(|open| open.close_price);
            if entry_price.is_none() {
                unmatched += 1;
            }
            CompletedTrade::from_close(close, entry_price)
        })
        .collect();

    debug!(
        events = events.len(),
        opens,
        trades = trades.len(),
        unmatched,
        leftover_opens = book.len(),
        "Heuristic reconciliation complete"
    );
    trades
}
