//! Encoders turning formatted rows into export files.
//!
//! Both encoders consume the same [`ExportTable`], the output of
//! [`formato606::to_table`](crate::formato606::to_table) or
//! [`formato607::to_table`](crate::formato607::to_table), so a TXT and an
//! XLSX export of the same records always carry the same values in the same
//! column order. Neither encoder embeds timestamps, random identifiers or
//! locale-dependent formatting: equal input gives byte-identical output.

mod text;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use text::{split_text, to_text};
#[cfg(feature = "xlsx")]
pub use xlsx::to_xlsx;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::TaxForm;

/// Formatted rows of one DGII form, ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    /// The form the rows belong to.
    pub form: TaxForm,
    /// Column headers in their fixed order.
    pub headers: &'static [&'static str],
    /// One entry per record, each with `headers.len()` formatted fields.
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Worksheet name, e.g. "Formato 606".
    pub fn sheet_name(&self) -> &'static str {
        self.form.sheet_name()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply `policy` to an empty table.
    pub fn check_empty(&self, policy: EmptyPolicy) -> Result<(), EncodeError> {
        match policy {
            EmptyPolicy::Reject if self.is_empty() => Err(EncodeError::NothingToExport(self.form)),
            _ => Ok(()),
        }
    }
}

/// What an encoder does with a table that has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Emit a file containing only the header.
    HeaderOnly,
    /// Fail with [`EncodeError::NothingToExport`].
    Reject,
}

/// Output container of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Delimited text.
    Txt,
    /// One-sheet spreadsheet.
    Xlsx,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Xlsx => "xlsx",
        }
    }

    /// MIME type of the produced artifact.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Txt => "text/plain; charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

/// Separator choices for the 607 text export. The 606 text export always uses `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesSeparator {
    #[default]
    Comma,
    Tab,
}

impl SalesSeparator {
    pub fn as_char(&self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }
}

/// Field separator of the 606 text export.
pub const PURCHASES_SEPARATOR: char = '|';

/// Errors raised while encoding an export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// The table is empty and the policy forbids a header-only file.
    #[error("No hay {} para exportar", .0.records_noun())]
    NothingToExport(TaxForm),

    /// A field contains the separator or a line break and cannot be written
    /// without corrupting the delimited layout.
    #[error("field '{column}' of row {row} contains the separator or a line break")]
    UnencodableField {
        /// Zero-based data row index.
        row: usize,
        /// Header of the offending column.
        column: &'static str,
    },

    /// Spreadsheet writer failure.
    #[error("XLSX error: {0}")]
    Xlsx(String),

    /// The output format was compiled out of this build.
    #[error("export format '{0}' is not enabled in this build")]
    FormatDisabled(&'static str),
}

/// Encode `table` in `format`, applying `policy` to empty tables first.
///
/// `separator` is only used for [`ExportFormat::Txt`].
pub fn encode(
    table: &ExportTable,
    format: ExportFormat,
    separator: char,
    policy: EmptyPolicy,
) -> Result<Vec<u8>, EncodeError> {
    table.check_empty(policy)?;
    match format {
        ExportFormat::Txt => to_text(table, separator).map(String::into_bytes),
        #[cfg(feature = "xlsx")]
        ExportFormat::Xlsx => to_xlsx(table),
        #[cfg(not(feature = "xlsx"))]
        ExportFormat::Xlsx => Err(EncodeError::FormatDisabled("xlsx")),
    }
}
