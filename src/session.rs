//! Current dataset and its rendered view.

use crate::domain::RawEvent;
use crate::engine::Matcher;
use crate::normalize::normalize;
use crate::report::Dashboard;
use crate::source::{EventSource, SourceError};
use serde_json::Value;
use tracing::info;

/// Canonical events plus the dashboard rendered from them.
///
/// A session is never mutated; importing data builds a new one.
#[derive(Debug, Clone)]
pub struct Session {
    events: Vec<RawEvent>,
    dashboard: Dashboard,
}

impl Session {
    pub fn new(events: Vec<RawEvent>, matcher: Matcher, calendar_year: i32) -> Self {
        let dashboard = Dashboard::render(&events, matcher, calendar_year);
        info!(
            events = events.len(),
            trades = dashboard.trades.len(),
            "Rendered session"
        );
        Self { events, dashboard }
    }

    /// Normalize raw records and render them.
    pub fn from_records(records: &[Value], matcher: Matcher, calendar_year: i32) -> Self {
        Self::new(normalize(records), matcher, calendar_year)
    }

    /// Pull records from a source and render them.
    pub async fn load(
        source: &dyn EventSource,
        matcher: Matcher,
        calendar_year: i32,
    ) -> Result<Self, SourceError> {
        let records = source.fetch_records().await?;
        Ok(Self::from_records(&records, matcher, calendar_year))
    }

    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}
