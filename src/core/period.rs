use chrono::{Datelike, NaiveDate};

use super::error::InvalidPeriod;
use super::types::TaxRecord;

/// A monthly DGII reporting period.
///
/// A record's period is always derived from its comprobante date, never
/// stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period; `month` must be in 1..=12.
    pub fn new(month: u32, year: i32) -> Result<Self, InvalidPeriod> {
        if !(1..=12).contains(&month) {
            return Err(InvalidPeriod { month, year });
        }
        Ok(Self { year, month })
    }

    /// The period a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Whether `date` falls in this period (same month and year).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    /// DGII period code `YYYYMM`, e.g. "202403".
    pub fn dgii_code(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Keep the records whose comprobante date falls in `period`, in source order.
///
/// No match yields an empty vector, not an error.
pub fn filter_by_period<R: TaxRecord + Clone>(records: &[R], period: Period) -> Vec<R> {
    records
        .iter()
        .filter(|r| period.contains(r.comprobante_date()))
        .cloned()
        .collect()
}
