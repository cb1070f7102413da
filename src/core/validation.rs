use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;

/// Validate purchase records against the Formato 606 field rules.
/// Returns all validation errors found across all records (not just the first).
pub fn validate_purchases(records: &[PurchaseRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        validate_purchase(rec, i, &mut errors);
    }
    errors
}

/// Validate sale records against the Formato 607 field rules.
/// Returns all validation errors found across all records (not just the first).
pub fn validate_sales(records: &[SaleRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        validate_sale(rec, i, &mut errors);
    }
    errors
}

fn validate_purchase(rec: &PurchaseRecord, i: usize, errors: &mut Vec<ValidationError>) {
    // RNC/Cédula of the supplier: length depends on the identifier kind
    if rec.rnc_proveedor.trim().is_empty() {
        errors.push(ValidationError::at(
            i,
            "rncProveedor",
            "El RNC/Cédula del proveedor es requerido",
        ));
    } else {
        match rec.tipo_identificacion {
            PurchaseIdKind::Rnc if !is_valid_rnc(&rec.rnc_proveedor) => {
                errors.push(ValidationError::at(
                    i,
                    "rncProveedor",
                    format!(
                        "El RNC debe tener 9 dígitos (recibido '{}')",
                        rec.rnc_proveedor
                    ),
                ));
            }
            PurchaseIdKind::Cedula if !is_valid_cedula(&rec.rnc_proveedor) => {
                errors.push(ValidationError::at(
                    i,
                    "rncProveedor",
                    format!(
                        "La cédula debe tener 11 dígitos (recibido '{}')",
                        rec.rnc_proveedor
                    ),
                ));
            }
            _ => {}
        }
    }

    validate_ncf(&rec.ncf, i, errors);

    if !is_valid_goods_type(&rec.tipo_bien_servicio) {
        errors.push(ValidationError::at(
            i,
            "tipoBienServicio",
            format!(
                "El tipo de bien/servicio debe ser un código de 2 dígitos (recibido '{}')",
                rec.tipo_bien_servicio
            ),
        ));
    }

    // fechaComprobante: guaranteed by the type system (NaiveDate)

    validate_non_negative(rec.monto_facturado, i, "montoFacturado", errors);
    validate_non_negative(rec.itbis_facturado, i, "itbisFacturado", errors);
    validate_non_negative(rec.retencion_isr, i, "retencionIsr", errors);
    validate_non_negative(rec.retencion_itbis, i, "retencionItbis", errors);
}

fn validate_sale(rec: &SaleRecord, i: usize, errors: &mut Vec<ValidationError>) {
    if rec.rnc_cedula.trim().is_empty() {
        errors.push(ValidationError::at(
            i,
            "rncCedula",
            "El RNC/Cédula del cliente es requerido",
        ));
    } else {
        match rec.tipo_identificacion {
            SaleIdKind::Rnc if !is_valid_rnc(&rec.rnc_cedula) => {
                errors.push(ValidationError::at(
                    i,
                    "rncCedula",
                    format!("El RNC debe tener 9 dígitos (recibido '{}')", rec.rnc_cedula),
                ));
            }
            SaleIdKind::Cedula if !is_valid_cedula(&rec.rnc_cedula) => {
                errors.push(ValidationError::at(
                    i,
                    "rncCedula",
                    format!(
                        "La cédula debe tener 11 dígitos (recibido '{}')",
                        rec.rnc_cedula
                    ),
                ));
            }
            // Passport numbers and consumidor final codes have no fixed shape
            _ => {}
        }
    }

    validate_ncf(&rec.ncf, i, errors);

    // tipoComprobante: guaranteed by the type system (enum)
    // fechaComprobante: guaranteed by the type system (NaiveDate)

    validate_non_negative(rec.monto_facturado, i, "montoFacturado", errors);
    validate_non_negative(rec.itbis_facturado, i, "itbisFacturado", errors);
    validate_non_negative(rec.retenciones.isr, i, "retenciones.isr", errors);
    validate_non_negative(rec.retenciones.itbis, i, "retenciones.itbis", errors);
}

fn validate_ncf(ncf: &str, i: usize, errors: &mut Vec<ValidationError>) {
    if ncf.trim().is_empty() {
        errors.push(ValidationError::at(i, "ncf", "El NCF es requerido"));
    } else if !is_valid_ncf(ncf) {
        errors.push(ValidationError::at(
            i,
            "ncf",
            format!(
                "NCF inválido '{ncf}': debe ser una letra mayúscula seguida de 10 dígitos"
            ),
        ));
    }
}

fn validate_non_negative(
    amount: Decimal,
    i: usize,
    name: &str,
    errors: &mut Vec<ValidationError>,
) {
    if amount.is_sign_negative() && !amount.is_zero() {
        errors.push(ValidationError::at(
            i,
            name,
            format!("El monto no puede ser negativo (recibido {amount})"),
        ));
    }
}

/// NCF shape: one uppercase ASCII letter followed by exactly 10 digits.
pub fn is_valid_ncf(ncf: &str) -> bool {
    let bytes = ncf.as_bytes();
    bytes.len() == 11
        && bytes[0].is_ascii_uppercase()
        && bytes[1..].iter().all(|b| b.is_ascii_digit())
}

/// RNC: exactly 9 digits.
pub fn is_valid_rnc(rnc: &str) -> bool {
    rnc.len() == 9 && rnc.bytes().all(|b| b.is_ascii_digit())
}

/// Cédula: exactly 11 digits.
pub fn is_valid_cedula(cedula: &str) -> bool {
    cedula.len() == 11 && cedula.bytes().all(|b| b.is_ascii_digit())
}

/// Good/service type code: exactly 2 digits.
pub fn is_valid_goods_type(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_digit())
}
