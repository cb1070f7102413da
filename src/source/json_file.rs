//! JSON document record source.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FetchError, RecordSource};
use crate::core::{Period, PurchaseRecord, SaleRecord, filter_by_period};

/// On-disk document layout: `{"purchases": [...], "sales": [...]}`.
///
/// Either list may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub purchases: Vec<PurchaseRecord>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
}

impl RecordSet {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        serde_json::from_str(json).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Record source reading a [`RecordSet`] JSON file on every query.
///
/// The file is re-read per call, so edits are picked up without restarting.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<RecordSet, FetchError> {
        debug!(path = %self.path.display(), "reading record file");
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {e}", self.path.display())))?;
        RecordSet::from_json(&json)
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn purchases(&self, period: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
        Ok(filter_by_period(&self.load().await?.purchases, period))
    }

    async fn sales(&self, period: Period) -> Result<Vec<SaleRecord>, FetchError> {
        Ok(filter_by_period(&self.load().await?.sales, period))
    }
}
