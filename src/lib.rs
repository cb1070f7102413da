//! # dgii-formatos
//!
//! Export pipeline for the Dominican Republic's DGII purchase and sales
//! reports: Formato 606 (compras) and Formato 607 (ventas).
//!
//! The pipeline selects the records of a fiscal period from a
//! [`source::RecordSource`], validates every regulatory field (RNC/Cédula,
//! NCF, good/service codes, non-negative amounts), projects the records into
//! the fixed DGII column layout and encodes them as delimited text or as a
//! one-sheet XLSX workbook.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dgii_formatos::core::*;
//! use dgii_formatos::formato606;
//! use rust_decimal_macros::dec;
//!
//! let compra = PurchaseRecordBuilder::new(
//!     "c-1",
//!     "131234567",
//!     "B0100000001",
//!     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
//! )
//! .monto_facturado(dec!(15000))
//! .itbis_facturado(dec!(2700))
//! .build();
//!
//! assert!(validate_purchases(std::slice::from_ref(&compra)).is_empty());
//!
//! let txt = formato606::to_txt(&[compra]).unwrap();
//! assert!(txt.contains("131234567|RNC|B0100000001|05/03/2024|15000.00|2700.00"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record types, validation, formatting, TXT encoder, export orchestrator |
//! | `xlsx` (default) | Spreadsheet encoder |
//! | `json` | JSON file record source |
//! | `http` | HTTP record source |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod encode;

#[cfg(feature = "core")]
pub mod formato606;

#[cfg(feature = "core")]
pub mod formato607;

#[cfg(feature = "core")]
pub mod source;

#[cfg(feature = "core")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
