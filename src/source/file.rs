//! JSON import file adapter.

use super::{parse_import_document, EventSource, SourceError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Reads an exported/imported JSON array of trade records from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EventSource for JsonFileSource {
    async fn fetch_records(&self) -> Result<Vec<Value>, SourceError> {
        debug!(path = %self.path.display(), "Reading trade records");
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_import_document(&text)
    }
}
