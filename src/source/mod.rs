//! Source adapters producing loosely-typed trade records.
//!
//! Adapters only acquire records; turning them into canonical events is the
//! normalizer's job, so a brittle acquisition mechanism never leaks into the
//! engine.

use crate::config::{Config, DatasetSource};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod file;
pub mod http;
pub mod memory;
pub mod table;

pub use file::JsonFileSource;
pub use http::HttpSource;
pub use memory::StaticSource;
pub use table::CsvTableSource;

/// Something that can produce raw trade records.
#[async_trait]
pub trait EventSource: Send + Sync + fmt::Debug {
    /// Fetch every available record. Records are returned as-is and may be
    /// missing fields or carry the wrong types.
    async fn fetch_records(&self) -> Result<Vec<Value>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error {0}")]
    HttpStatus(u16),
    #[error("rate limited")]
    RateLimited,
}

/// Parse an import document: a non-empty top-level JSON array.
pub fn parse_import_document(text: &str) -> Result<Vec<Value>, SourceError> {
    let value: Value = serde_json::from_str(text)?;
    records_from_value(value)
}

pub fn records_from_value(value: Value) -> Result<Vec<Value>, SourceError> {
    match value {
        Value::Array(records) if !records.is_empty() => Ok(records),
        Value::Array(_) => Err(SourceError::InvalidFormat("empty array".to_string())),
        _ => Err(SourceError::InvalidFormat(
            "expected a JSON array of trade records".to_string(),
        )),
    }
}

/// Build the adapter selected by configuration.
pub fn from_config(config: &Config) -> Arc<dyn EventSource> {
    match &config.dataset {
        DatasetSource::Sample => Arc::new(StaticSource::sample()),
        DatasetSource::JsonFile(path) => Arc::new(JsonFileSource::new(path.clone())),
        DatasetSource::CsvTable(path) => Arc::new(CsvTableSource::new(path.clone())),
        DatasetSource::Url(url) => Arc::new(HttpSource::new(
            url.clone(),
            Duration::from_secs(config.fetch_max_elapsed_secs),
        )),
    }
}
