//! DGII Formato 606: purchases of goods and services.
//!
//! Column order is fixed; reordering it breaks every consumer of the file.
//!
//! # Example
//!
//! ```no_run
//! use dgii_formatos::formato606;
//! # fn main() -> Result<(), dgii_formatos::encode::EncodeError> {
//! # let compras: Vec<dgii_formatos::PurchaseRecord> = Vec::new();
//!
//! let txt = formato606::to_txt(&compras)?; // `|`-separated
//! # #[cfg(feature = "xlsx")]
//! let xlsx = formato606::to_xlsx(&compras)?; // sheet "Formato 606"
//! # Ok(())
//! # }
//! ```
//!
//! An empty slice is not an error here: both generators emit a header-only
//! file.

use crate::core::{PurchaseRecord, TaxForm, format_amount, format_date, format_optional_date};
use crate::encode::{self, EmptyPolicy, EncodeError, ExportTable, PURCHASES_SEPARATOR};

/// Formato 606 column headers, in export order.
pub const HEADERS: &[&str] = &[
    "RNC/Cédula",
    "Tipo de Identificación",
    "NCF",
    "Fecha del Comprobante",
    "Monto Facturado",
    "ITBIS Facturado",
    "Retención ISR",
    "Retención ITBIS",
    "Tipo de Bien/Servicio",
    "Fecha de Pago",
];

/// Empty-input behaviour of the direct 606 generators.
pub const DEFAULT_EMPTY_POLICY: EmptyPolicy = EmptyPolicy::HeaderOnly;

/// Project one purchase into its formatted 606 columns.
pub fn row(rec: &PurchaseRecord) -> Vec<String> {
    vec![
        rec.rnc_proveedor.clone(),
        rec.tipo_identificacion.code().to_string(),
        rec.ncf.clone(),
        format_date(rec.fecha_comprobante),
        format_amount(rec.monto_facturado),
        format_amount(rec.itbis_facturado),
        format_amount(rec.retencion_isr),
        format_amount(rec.retencion_itbis),
        rec.tipo_bien_servicio.clone(),
        format_optional_date(rec.fecha_pago),
    ]
}

/// Project purchases into an [`ExportTable`], preserving order.
pub fn to_table(records: &[PurchaseRecord]) -> ExportTable {
    ExportTable {
        form: TaxForm::Formato606,
        headers: HEADERS,
        rows: records.iter().map(row).collect(),
    }
}

/// Generate the `|`-separated 606 text file.
pub fn to_txt(records: &[PurchaseRecord]) -> Result<String, EncodeError> {
    let table = to_table(records);
    table.check_empty(DEFAULT_EMPTY_POLICY)?;
    encode::to_text(&table, PURCHASES_SEPARATOR)
}

/// Generate the 606 workbook.
#[cfg(feature = "xlsx")]
pub fn to_xlsx(records: &[PurchaseRecord]) -> Result<Vec<u8>, EncodeError> {
    let table = to_table(records);
    table.check_empty(DEFAULT_EMPTY_POLICY)?;
    encode::to_xlsx(&table)
}
