//! Core record types, period selection, validation, and field formatting.
//!
//! This module provides the typed 606/607 records, the DGII field format
//! rules, and the pure formatting functions shared by every encoder.

mod builder;
mod error;
mod format;
mod period;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use format::*;
pub use period::*;
pub use types::*;
pub use validation::*;
