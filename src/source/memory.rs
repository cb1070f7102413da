use async_trait::async_trait;

use super::{FetchError, RecordSource};
use crate::core::{Period, PurchaseRecord, SaleRecord, filter_by_period};

/// Record source over in-memory record sets.
///
/// Holds the full, read-only record sets and answers each query with the
/// records of the requested period.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    purchases: Vec<PurchaseRecord>,
    sales: Vec<SaleRecord>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_purchases(mut self, records: Vec<PurchaseRecord>) -> Self {
        self.purchases = records;
        self
    }

    pub fn with_sales(mut self, records: Vec<SaleRecord>) -> Self {
        self.sales = records;
        self
    }

    /// Every purchase, regardless of period.
    pub fn all_purchases(&self) -> &[PurchaseRecord] {
        &self.purchases
    }

    /// Every sale, regardless of period.
    pub fn all_sales(&self) -> &[SaleRecord] {
        &self.sales
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn purchases(&self, period: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
        Ok(filter_by_period(&self.purchases, period))
    }

    async fn sales(&self, period: Period) -> Result<Vec<SaleRecord>, FetchError> {
        Ok(filter_by_period(&self.sales, period))
    }
}
