pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod report;
pub mod session;
pub mod source;

pub use config::Config;
pub use domain::{
    CompletedTrade, Decimal, EventTime, Leverage, Market, OperationType, RawEvent, Side,
};
pub use engine::{Matcher, TradeStats};
pub use error::AppError;
pub use normalize::normalize;
pub use report::Dashboard;
pub use session::Session;
pub use source::{EventSource, SourceError};
