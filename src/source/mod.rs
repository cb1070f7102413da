//! Record sources and the period query.
//!
//! The export pipeline only depends on the [`RecordSource`] trait; callers
//! pick an implementation:
//!
//! - [`InMemorySource`]: records held in memory (tests, embedded use)
//! - `JsonFileSource`: a JSON document on disk (feature `json`)
//! - `HttpSource`: a REST endpoint per form (feature `http`)
//!
//! # Example
//!
//! ```no_run
//! use dgii_formatos::core::{Period, PurchaseRecord, TaxForm};
//! use dgii_formatos::source::*;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let compras: Vec<PurchaseRecord> = Vec::new();
//!
//! let source = InMemorySource::new().with_purchases(compras);
//! let march = Period::new(3, 2024)?;
//! let records = fetch_records_for_period(&source, TaxForm::Formato606, march).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "json")]
mod json_file;
mod memory;

#[cfg(feature = "http")]
pub use http::{HttpSource, HttpSourceBuilder};
#[cfg(feature = "json")]
pub use json_file::{JsonFileSource, RecordSet};
pub use memory::InMemorySource;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::core::{Period, PurchaseRecord, SaleRecord, TaxForm, filter_by_period};

/// Errors from a record source. No partial result is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The source could not be reached.
    #[error("record source unavailable: {0}")]
    Unavailable(String),

    /// Local I/O failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// The source answered with data that is not a valid record list.
    #[error("invalid record data: {0}")]
    Parse(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

/// Provider of the transactional records of a period.
///
/// Implementations may return more than the period's records;
/// [`fetch_records_for_period`] always filters the result.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Purchases (606) for `period`.
    async fn purchases(&self, period: Period) -> Result<Vec<PurchaseRecord>, FetchError>;

    /// Sales (607) for `period`.
    async fn sales(&self, period: Period) -> Result<Vec<SaleRecord>, FetchError>;
}

#[async_trait]
impl<S: RecordSource + ?Sized> RecordSource for &S {
    async fn purchases(&self, period: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
        (**self).purchases(period).await
    }

    async fn sales(&self, period: Period) -> Result<Vec<SaleRecord>, FetchError> {
        (**self).sales(period).await
    }
}

#[async_trait]
impl<S: RecordSource + ?Sized> RecordSource for std::sync::Arc<S> {
    async fn purchases(&self, period: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
        (**self).purchases(period).await
    }

    async fn sales(&self, period: Period) -> Result<Vec<SaleRecord>, FetchError> {
        (**self).sales(period).await
    }
}

/// The records of one form for one period.
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    Purchases(Vec<PurchaseRecord>),
    Sales(Vec<SaleRecord>),
}

impl Records {
    pub fn form(&self) -> TaxForm {
        match self {
            Self::Purchases(_) => TaxForm::Formato606,
            Self::Sales(_) => TaxForm::Formato607,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Purchases(r) => r.len(),
            Self::Sales(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Select the records of `kind` whose comprobante date falls in `period`.
///
/// Purchases back Formato 606, sales back Formato 607. No match yields an
/// empty list, not an error.
pub async fn fetch_records_for_period<S: RecordSource + ?Sized>(
    source: &S,
    kind: TaxForm,
    period: Period,
) -> Result<Records, FetchError> {
    let records = match kind {
        TaxForm::Formato606 => {
            let all = source.purchases(period).await?;
            Records::Purchases(filter_by_period(&all, period))
        }
        TaxForm::Formato607 => {
            let all = source.sales(period).await?;
            Records::Sales(filter_by_period(&all, period))
        }
    };
    debug!(form = %kind, %period, count = records.len(), "records fetched");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PurchaseRecordBuilder, SaleRecordBuilder};
    use chrono::NaiveDate;

    /// Ignores the period and returns everything it holds.
    struct Unfiltered(InMemorySource);

    #[async_trait]
    impl RecordSource for Unfiltered {
        async fn purchases(&self, _: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
            Ok(self.0.all_purchases().to_vec())
        }

        async fn sales(&self, _: Period) -> Result<Vec<SaleRecord>, FetchError> {
            Ok(self.0.all_sales().to_vec())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_purchases(vec![
                PurchaseRecordBuilder::new("c-1", "131234567", "B0100000001", date(2024, 3, 1))
                    .build(),
                PurchaseRecordBuilder::new("c-2", "131234567", "B0100000002", date(2024, 4, 1))
                    .build(),
            ])
            .with_sales(vec![
                SaleRecordBuilder::new("v-1", "131234567", "B0100000003", date(2024, 3, 31))
                    .build(),
            ])
    }

    #[tokio::test]
    async fn over_returning_source_is_refiltered() {
        let src = Unfiltered(source());
        let march = Period::new(3, 2024).unwrap();
        let Records::Purchases(found) = fetch_records_for_period(&src, TaxForm::Formato606, march)
            .await
            .unwrap()
        else {
            panic!("expected purchases");
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "c-1");
    }

    #[tokio::test]
    async fn kind_selects_record_set() {
        let src = source();
        let march = Period::new(3, 2024).unwrap();
        let sales = fetch_records_for_period(&src, TaxForm::Formato607, march)
            .await
            .unwrap();
        assert_eq!(sales.form(), TaxForm::Formato607);
        assert_eq!(sales.len(), 1);

        let none = fetch_records_for_period(&src, TaxForm::Formato607, Period::new(5, 2024).unwrap())
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
