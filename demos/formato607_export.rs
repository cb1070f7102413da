use std::path::PathBuf;

use chrono::NaiveDate;
use dgii_formatos::core::*;
use dgii_formatos::export::{ExportConfigBuilder, ExportFormat, Exporter, SalesSeparator};
use dgii_formatos::source::InMemorySource;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let ventas = vec![
        SaleRecordBuilder::new("v-1", "131234567", "B0100000101", date(2024, 3, 2))
            .monto_facturado(dec!(25000))
            .itbis_facturado(dec!(4500))
            .retencion_isr(dec!(2500))
            .forma_pago(PaymentMethod::Credito)
            .build(),
        SaleRecordBuilder::new("v-2", "00112345678", "B0200000102", date(2024, 3, 9))
            .tipo_identificacion(SaleIdKind::Cedula)
            .tipo_comprobante(DocumentType::B02)
            .monto_facturado(dec!(1200))
            .itbis_facturado(dec!(216))
            .forma_pago(PaymentMethod::Tarjeta)
            .build(),
    ];

    let config = ExportConfigBuilder::new()
        .sales_separator(SalesSeparator::Tab)
        .build();
    let exporter = Exporter::with_config(InMemorySource::new().with_sales(ventas), config);

    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    let march = Period::new(3, 2024).unwrap();
    for format in [ExportFormat::Txt, ExportFormat::Xlsx] {
        match exporter.export_607(march, format).await {
            Ok(artifact) => match artifact.save_to_dir(&out_dir) {
                Ok(path) => println!("{} -> {}", artifact.file_name, path.display()),
                Err(e) => eprintln!("could not write {}: {e}", artifact.file_name),
            },
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    // No sales in May: Formato 607 refuses an empty export.
    let may = Period::new(5, 2024).unwrap();
    if let Err(e) = exporter.export_607(may, ExportFormat::Txt).await {
        println!("{may}: {}", e.user_message());
    }
}
