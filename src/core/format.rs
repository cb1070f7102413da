//! Field formatting shared by every 606/607 encoder.
//!
//! Both the text and the spreadsheet exports go through these functions, so
//! the two containers never disagree on a value.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::InvalidDate;

/// Format a date as `DD/MM/YYYY`, independent of any locale.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format an optional date; `None` becomes an empty column.
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// Format an amount with exactly two decimals, no grouping, no symbol.
///
/// Midpoints round away from zero: `0.005` → `"0.01"`. Zero is always
/// written unsigned, including `-0` and values that round to zero.
pub fn format_amount(amount: Decimal) -> String {
    let mut scaled = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if scaled.is_zero() {
        scaled.set_sign_positive(true);
    }
    format!("{:.2}", scaled)
}

/// Parse an ISO-like date string.
///
/// Accepts `YYYY-MM-DD` optionally followed by `T` or a space and any time
/// part (`2024-03-15T10:30:00Z`, `2024-03-15 00:00:00`). Only the calendar
/// date is kept; the time and offset are ignored.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, InvalidDate> {
    let raw = raw.trim();
    let invalid = || InvalidDate(raw.to_string());

    let date_part = raw.get(..10).ok_or_else(invalid)?;
    match raw.get(10..) {
        Some("") => {}
        Some(rest) if rest.starts_with('T') || rest.starts_with(' ') => {}
        _ => return Err(invalid()),
    }

    // chrono's %Y also accepts signed and short years; DGII dates are always 4 digits.
    let b = date_part.as_bytes();
    let shape_ok = b[4] == b'-'
        && b[7] == b'-'
        && b
            .iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shape_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())
}

/// Reformat an ISO-like date string as `DD/MM/YYYY`.
pub fn format_iso_date(raw: &str) -> Result<String, InvalidDate> {
    parse_iso_date(raw).map(format_date)
}
