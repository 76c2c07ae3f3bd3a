use crate::domain::{sort_by_event_time, CompletedTrade, Decimal, Market, RawEvent, Side};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Remaining quantity of one Open event.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Lot {
    price: Decimal,
    remaining: Decimal,
}

/// Per-(market, side) FIFO queues of open lots.
#[derive(Debug, Default)]
struct LotBook {
    queues: HashMap<(Market, Side), VecDeque<Lot>>,
}

impl LotBook {
    fn open(&mut self, event: &RawEvent) {
        self.queues
            .entry((event.market.clone(), event.side.clone()))
            .or_default()
            .push_back(Lot {
                price: event.close_price,
                remaining: event.size,
            });
    }

    /// Consume lots for a Close of `size`, returning the size-weighted entry
    /// price of the consumed quantity.
    ///
    /// A zero-size Close (or lots without size) consumes one whole lot.
    fn close(&mut self, market: &Market, side: &Side, size: Decimal) -> Option<Decimal> {
        let queue = self.queues.get_mut(&(market.clone(), side.clone()))?;
        let front = queue.front()?;

        if size.is_zero() || front.remaining.is_zero() {
            return queue.pop_front().map(|lot| lot.price);
        }

        let mut wanted = size;
        let mut filled = Decimal::zero();
        let mut notional = Decimal::zero();

        while wanted.is_positive() {
            let Some(lot) = queue.front_mut() else { break };
            if lot.remaining.is_zero() {
                queue.pop_front();
                continue;
            }
            let take = wanted.min(lot.remaining);
            notional = notional + take * lot.price;
            filled = filled + take;
            wanted = wanted - take;
            lot.remaining = lot.remaining - take;
            if lot.remaining.is_zero() {
                queue.pop_front();
            }
        }

        if filled.is_zero() {
            None
        } else {
            Some(notional / filled)
        }
    }
}

/// Pair priced Close events with Open lots in chronological FIFO order,
/// honouring partial fills by size.
///
/// Events are visited oldest first (ties keep input order); unpriced closes
/// neither emit a trade nor consume lots. The result is returned in the
/// input order of the Close events, same as the heuristic matcher.
pub fn reconcile_fifo(events: &[RawEvent], calendar_year: i32) -> Vec<CompletedTrade> {
    let mut order: Vec<(usize, &RawEvent)> = events.iter().enumerate().collect();
    sort_by_event_time(&mut order, calendar_year, |(_, e)| {
        (e.date.as_str(), e.time.as_str())
    });

    let mut book = LotBook::default();
    let mut emitted: Vec<(usize, CompletedTrade)> = Vec::new();

    for (i, event) in order {
        if event.is_open() {
            book.open(event);
        } else if event.is_priced_close() {
            let entry_price = book.close(&event.market, &event.side, event.size);
            if let Some(trade) = CompletedTrade::from_close(event, entry_price) {
                emitted.push((i, trade));
            }
        }
    }

    emitted.sort_by_key(|(i, _)| *i);
    let trades: Vec<CompletedTrade> = emitted.into_iter().map(|(_, t)| t).collect();

    debug!(
        events = events.len(),
        trades = trades.len(),
        unmatched = trades.iter().filter(|t| !t.is_matched()).count(),
        "FIFO reconciliation complete"
    );
    trades
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn lot_event(size: &str, px: &str) -> RawEvent {
        RawEvent {
            market: Market::new("BTC/USD".to_string()),
            side: Side::Long,
            size: d(size),
            close_price: d(px),
            ..RawEvent::default()
        }
    }

    #[test]
    fn test_lot_book_weighted_entry_across_lots() {
        let mut book = LotBook::default();
        book.open(&lot_event("1", "100"));
        book.open(&lot_event("1", "200"));

        let market = Market::new("BTC/USD".to_string());
        let entry = book.close(&market, &Side::Long, d("2")).unwrap();
        assert_eq!(entry, d("150"));
        assert!(book.close(&market, &Side::Long, d("1")).is_none());
    }

    #[test]
    fn test_lot_book_partial_fill_keeps_remainder() {
        let mut book = LotBook::default();
        book.open(&lot_event("3", "100"));

        let market = Market::new("BTC/USD".to_string());
        assert_eq!(book.close(&market, &Side::Long, d("1")), Some(d("100")));
        assert_eq!(book.close(&market, &Side::Long, d("2")), Some(d("100")));
        assert_eq!(book.close(&market, &Side::Long, d("1")), None);
    }

    #[test]
    fn test_lot_book_zero_size_close_consumes_one_lot() {
        let mut book = LotBook::default();
        book.open(&lot_event("5", "100"));
        book.open(&lot_event("5", "110"));

        let market = Market::new("BTC/USD".to_string());
        assert_eq!(book.close(&market, &Side::Long, Decimal::zero()), Some(d("100")));
        assert_eq!(book.close(&market, &Side::Long, Decimal::zero()), Some(d("110")));
    }

    #[test]
    fn test_lot_book_oversized_close_uses_available_quantity() {
        let mut book = LotBook::default();
        book.open(&lot_event("1", "100"));

        let market = Market::new("BTC/USD".to_string());
        assert_eq!(book.close(&market, &Side::Long, d("4")), Some(d("100")));
    }
}
