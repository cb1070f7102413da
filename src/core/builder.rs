use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Builder for [`PurchaseRecord`] (Formato 606).
///
/// Amounts default to zero, the identifier kind to RNC and the good/service
/// type to "02" (trabajos, suministros y servicios). The builder never
/// rejects data: format problems are reported by
/// [`validate_purchases`](super::validate_purchases).
///
/// ```
/// use dgii_formatos::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let compra = PurchaseRecordBuilder::new(
///     "c-1",
///     "00112345678",
///     "B0100000001",
///     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
/// )
/// .tipo_identificacion(PurchaseIdKind::Cedula)
/// .monto_facturado(dec!(1000))
/// .itbis_facturado(dec!(180))
/// .fecha_pago(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
/// .build();
/// assert_eq!(compra.tipo_bien_servicio, "02");
/// ```
pub struct PurchaseRecordBuilder {
    record: PurchaseRecord,
}

impl PurchaseRecordBuilder {
    pub fn new(
        id: impl Into<String>,
        rnc_proveedor: impl Into<String>,
        ncf: impl Into<String>,
        fecha_comprobante: NaiveDate,
    ) -> Self {
        Self {
            record: PurchaseRecord {
                id: id.into(),
                rnc_proveedor: rnc_proveedor.into(),
                tipo_identificacion: PurchaseIdKind::Rnc,
                ncf: ncf.into(),
                fecha_comprobante,
                monto_facturado: Decimal::ZERO,
                itbis_facturado: Decimal::ZERO,
                retencion_isr: Decimal::ZERO,
                retencion_itbis: Decimal::ZERO,
                tipo_bien_servicio: "02".into(),
                fecha_pago: None,
            },
        }
    }

    pub fn tipo_identificacion(mut self, kind: PurchaseIdKind) -> Self {
        self.record.tipo_identificacion = kind;
        self
    }

    pub fn monto_facturado(mut self, amount: Decimal) -> Self {
        self.record.monto_facturado = amount;
        self
    }

    pub fn itbis_facturado(mut self, amount: Decimal) -> Self {
        self.record.itbis_facturado = amount;
        self
    }

    pub fn retencion_isr(mut self, amount: Decimal) -> Self {
        self.record.retencion_isr = amount;
        self
    }

    pub fn retencion_itbis(mut self, amount: Decimal) -> Self {
        self.record.retencion_itbis = amount;
        self
    }

    pub fn tipo_bien_servicio(mut self, code: impl Into<String>) -> Self {
        self.record.tipo_bien_servicio = code.into();
        self
    }

    pub fn fecha_pago(mut self, date: NaiveDate) -> Self {
        self.record.fecha_pago = Some(date);
        self
    }

    pub fn build(self) -> PurchaseRecord {
        self.record
    }
}

/// Builder for [`SaleRecord`] (Formato 607).
///
/// Defaults: identifier kind RNC, comprobante B01, payment method efectivo,
/// zero amounts and withholdings.
pub struct SaleRecordBuilder {
    record: SaleRecord,
}

impl SaleRecordBuilder {
    pub fn new(
        id: impl Into<String>,
        rnc_cedula: impl Into<String>,
        ncf: impl Into<String>,
        fecha_comprobante: NaiveDate,
    ) -> Self {
        Self {
            record: SaleRecord {
                id: id.into(),
                rnc_cedula: rnc_cedula.into(),
                tipo_identificacion: SaleIdKind::Rnc,
                ncf: ncf.into(),
                tipo_comprobante: DocumentType::B01,
                fecha_comprobante,
                monto_facturado: Decimal::ZERO,
                itbis_facturado: Decimal::ZERO,
                retenciones: Withholdings::default(),
                forma_pago: PaymentMethod::Efectivo,
            },
        }
    }

    pub fn tipo_identificacion(mut self, kind: SaleIdKind) -> Self {
        self.record.tipo_identificacion = kind;
        self
    }

    pub fn tipo_comprobante(mut self, doc: DocumentType) -> Self {
        self.record.tipo_comprobante = doc;
        self
    }

    pub fn monto_facturado(mut self, amount: Decimal) -> Self {
        self.record.monto_facturado = amount;
        self
    }

    pub fn itbis_facturado(mut self, amount: Decimal) -> Self {
        self.record.itbis_facturado = amount;
        self
    }

    pub fn retencion_isr(mut self, amount: Decimal) -> Self {
        self.record.retenciones.isr = amount;
        self
    }

    pub fn retencion_itbis(mut self, amount: Decimal) -> Self {
        self.record.retenciones.itbis = amount;
        self
    }

    pub fn forma_pago(mut self, method: PaymentMethod) -> Self {
        self.record.forma_pago = method;
        self
    }

    pub fn build(self) -> SaleRecord {
        self.record
    }
}
