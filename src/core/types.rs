use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The DGII report a record set is exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxForm {
    /// Formato 606: purchases of goods and services (compras).
    #[serde(rename = "606")]
    Formato606,
    /// Formato 607: sales of goods and services (ventas).
    #[serde(rename = "607")]
    Formato607,
}

impl TaxForm {
    /// DGII form number.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Formato606 => "606",
            Self::Formato607 => "607",
        }
    }

    /// Worksheet name used by the spreadsheet export.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Formato606 => "Formato 606",
            Self::Formato607 => "Formato 607",
        }
    }

    /// File name stem, e.g. "formato606".
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Formato606 => "formato606",
            Self::Formato607 => "formato607",
        }
    }

    /// Plural noun for the records of this form, used in user messages.
    pub fn records_noun(&self) -> &'static str {
        match self {
            Self::Formato606 => "compras",
            Self::Formato607 => "ventas",
        }
    }
}

impl std::fmt::Display for TaxForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// Common surface of the records exported to a DGII form.
pub trait TaxRecord {
    /// The form this record type belongs to.
    const FORM: TaxForm;

    /// Fecha del comprobante: determines the record's period.
    fn comprobante_date(&self) -> NaiveDate;
}

/// Kind of counterparty identifier on a purchase (606).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseIdKind {
    /// Registro Nacional del Contribuyente (9 digits).
    #[serde(rename = "RNC")]
    Rnc,
    /// Cédula de identidad (11 digits).
    #[serde(rename = "CEDULA")]
    Cedula,
}

impl PurchaseIdKind {
    /// Stored code as written to the export.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rnc => "RNC",
            Self::Cedula => "CEDULA",
        }
    }

    /// Parse from the stored code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RNC" => Some(Self::Rnc),
            "CEDULA" => Some(Self::Cedula),
            _ => None,
        }
    }
}

/// Kind of counterparty identifier on a sale (607).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleIdKind {
    /// 1: RNC.
    #[serde(rename = "1")]
    Rnc,
    /// 2: Cédula.
    #[serde(rename = "2")]
    Cedula,
    /// 3: Pasaporte.
    #[serde(rename = "3")]
    Pasaporte,
    /// 4: Consumidor final (anonymous consumer).
    #[serde(rename = "4")]
    ConsumidorFinal,
}

impl SaleIdKind {
    /// DGII identifier-type code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rnc => "1",
            Self::Cedula => "2",
            Self::Pasaporte => "3",
            Self::ConsumidorFinal => "4",
        }
    }

    /// Parse from the DGII identifier-type code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Rnc),
            "2" => Some(Self::Cedula),
            "3" => Some(Self::Pasaporte),
            "4" => Some(Self::ConsumidorFinal),
            _ => None,
        }
    }
}

/// Tipo de comprobante fiscal of a sale (607).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// B01: Crédito fiscal.
    B01,
    /// B02: Consumo.
    B02,
    /// B14: Regímenes especiales.
    B14,
    /// B15: Gubernamental.
    B15,
}

impl DocumentType {
    /// NCF series code as reported in the 607 (e.g. "B01").
    pub fn code(&self) -> &'static str {
        match self {
            Self::B01 => "B01",
            Self::B02 => "B02",
            Self::B14 => "B14",
            Self::B15 => "B15",
        }
    }

    /// Parse a series code; `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "B01" => Some(Self::B01),
            "B02" => Some(Self::B02),
            "B14" => Some(Self::B14),
            "B15" => Some(Self::B15),
            _ => None,
        }
    }

    /// Human-readable description (Spanish).
    pub fn description(&self) -> &'static str {
        match self {
            Self::B01 => "Crédito Fiscal",
            Self::B02 => "Consumo",
            Self::B14 => "Regímenes Especiales",
            Self::B15 => "Gubernamental",
        }
    }
}

/// Forma de pago of a sale (607).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// 01: Efectivo.
    #[serde(rename = "01")]
    Efectivo,
    /// 02: Cheque, transferencia o depósito.
    #[serde(rename = "02")]
    ChequeTransferencia,
    /// 03: Tarjeta de crédito o débito.
    #[serde(rename = "03")]
    Tarjeta,
    /// 04: Venta a crédito.
    #[serde(rename = "04")]
    Credito,
}

impl PaymentMethod {
    /// Two-digit DGII forma de pago code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Efectivo => "01",
            Self::ChequeTransferencia => "02",
            Self::Tarjeta => "03",
            Self::Credito => "04",
        }
    }

    /// Parse from the two-digit code; `None` for unknown codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Efectivo),
            "02" => Some(Self::ChequeTransferencia),
            "03" => Some(Self::Tarjeta),
            "04" => Some(Self::Credito),
            _ => None,
        }
    }
}

/// A purchase reported in Formato 606.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// Internal identifier in the source system.
    pub id: String,
    /// Supplier RNC or cédula, digits only.
    pub rnc_proveedor: String,
    pub tipo_identificacion: PurchaseIdKind,
    /// Número de Comprobante Fiscal, e.g. "B0100000001".
    pub ncf: String,
    #[serde(with = "iso_date")]
    pub fecha_comprobante: NaiveDate,
    pub monto_facturado: Decimal,
    pub itbis_facturado: Decimal,
    pub retencion_isr: Decimal,
    pub retencion_itbis: Decimal,
    /// Two-digit DGII good/service type code ("01".."11").
    pub tipo_bien_servicio: String,
    /// Payment date; `None` while the purchase is unpaid.
    #[serde(default, with = "iso_date_opt")]
    pub fecha_pago: Option<NaiveDate>,
}

impl TaxRecord for PurchaseRecord {
    const FORM: TaxForm = TaxForm::Formato606;

    fn comprobante_date(&self) -> NaiveDate {
        self.fecha_comprobante
    }
}

/// Amounts withheld on a sale by the buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Withholdings {
    /// Retención ISR.
    pub isr: Decimal,
    /// Retención ITBIS.
    pub itbis: Decimal,
}

/// A sale reported in Formato 607.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    /// Customer RNC, cédula or passport number.
    pub rnc_cedula: String,
    pub tipo_identificacion: SaleIdKind,
    pub ncf: String,
    pub tipo_comprobante: DocumentType,
    #[serde(with = "iso_date")]
    pub fecha_comprobante: NaiveDate,
    pub monto_facturado: Decimal,
    pub itbis_facturado: Decimal,
    #[serde(default)]
    pub retenciones: Withholdings,
    pub forma_pago: PaymentMethod,
}

impl TaxRecord for SaleRecord {
    const FORM: TaxForm = TaxForm::Formato607;

    fn comprobante_date(&self) -> NaiveDate {
        self.fecha_comprobante
    }
}

/// Serde adapter: ISO-like date string <-> `NaiveDate`.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        crate::core::parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }
}

mod iso_date_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.collect_str(&date.format("%Y-%m-%d")),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        // Empty strings count as "not paid yet".
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => crate::core::parse_iso_date(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
