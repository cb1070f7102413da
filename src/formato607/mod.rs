//! DGII Formato 607: sales of goods and services.
//!
//! The text layout takes a caller-chosen separator (comma or tab). Unlike
//! Formato 606, the direct generators refuse an empty record list with
//! [`EncodeError::NothingToExport`] ("No hay ventas para exportar").

use crate::core::{SaleRecord, TaxForm, format_amount, format_date};
use crate::encode::{self, EmptyPolicy, EncodeError, ExportTable, SalesSeparator};

/// Formato 607 column headers, in export order.
pub const HEADERS: &[&str] = &[
    "RNC/Cédula",
    "Tipo de ID",
    "NCF",
    "Tipo de Comprobante",
    "Fecha Comprobante",
    "Monto Facturado",
    "ITBIS Facturado",
    "Retención ISR",
    "Retención ITBIS",
    "Forma de Pago",
];

/// Empty-input behaviour of the direct 607 generators.
pub const DEFAULT_EMPTY_POLICY: EmptyPolicy = EmptyPolicy::Reject;

/// Project one sale into its formatted 607 columns.
pub fn row(rec: &SaleRecord) -> Vec<String> {
    vec![
        rec.rnc_cedula.clone(),
        rec.tipo_identificacion.code().to_string(),
        rec.ncf.clone(),
        rec.tipo_comprobante.code().to_string(),
        format_date(rec.fecha_comprobante),
        format_amount(rec.monto_facturado),
        format_amount(rec.itbis_facturado),
        format_amount(rec.retenciones.isr),
        format_amount(rec.retenciones.itbis),
        rec.forma_pago.code().to_string(),
    ]
}

/// Project sales into an [`ExportTable`], preserving order.
pub fn to_table(records: &[SaleRecord]) -> ExportTable {
    ExportTable {
        form: TaxForm::Formato607,
        headers: HEADERS,
        rows: records.iter().map(row).collect(),
    }
}

/// Generate the 607 text file with the given separator.
pub fn to_txt(records: &[SaleRecord], separator: SalesSeparator) -> Result<String, EncodeError> {
    let table = to_table(records);
    table.check_empty(DEFAULT_EMPTY_POLICY)?;
    encode::to_text(&table, separator.as_char())
}

/// Generate the 607 workbook.
#[cfg(feature = "xlsx")]
pub fn to_xlsx(records: &[SaleRecord]) -> Result<Vec<u8>, EncodeError> {
    let table = to_table(records);
    table.check_empty(DEFAULT_EMPTY_POLICY)?;
    encode::to_xlsx(&table)
}
