//! Chronological ordering for events and trades.
//!
//! The venue only shows "dd/mm" and "HH:MM" tokens, so a calendar year has
//! to be supplied to turn them into a timestamp.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parsed event timestamp. Ordering puts unparseable tokens (`None`) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventTime(pub Option<NaiveDateTime>);

impl EventTime {
    /// Parse "dd/mm" + "HH:MM" in the given year.
    pub fn parse(date: &str, time: &str, year: i32) -> Self {
        EventTime(parse_date_time(date, time, year))
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

fn parse_date_time(date: &str, time: &str, year: i32) -> Option<NaiveDateTime> {
    let mut parts = date.trim().split('/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let time = time.trim();
    let time = if time.is_empty() {
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .ok()?
    };

    Some(date.and_time(time))
}

/// Stable sort by `EventTime`, preserving input order for ties.
pub fn sort_by_event_time<T, F>(items: &mut [T], year: i32, key: F)
where
    F: Fn(&T) -> (&str, &str),
{
    items.sort_by_cached_key(|item| {
        let (date, time) = key(item);
        EventTime::parse(date, time, year)
    });
}
