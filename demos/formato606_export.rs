use chrono::NaiveDate;
use dgii_formatos::core::*;
use dgii_formatos::export::{ExportFormat, ExportOutcome, Exporter};
use dgii_formatos::source::InMemorySource;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let compras = vec![
        PurchaseRecordBuilder::new("c-1", "131234567", "B0100000001", date(2024, 3, 4))
            .monto_facturado(dec!(15000))
            .itbis_facturado(dec!(2700))
            .tipo_bien_servicio("09")
            .fecha_pago(date(2024, 3, 30))
            .build(),
        PurchaseRecordBuilder::new("c-2", "00112345678", "B0100000002", date(2024, 3, 18))
            .tipo_identificacion(PurchaseIdKind::Cedula)
            .monto_facturado(dec!(8500.75))
            .itbis_facturado(dec!(1530.14))
            .retencion_isr(dec!(850.08))
            .build(),
        // April: outside the exported period
        PurchaseRecordBuilder::new("c-3", "131234567", "B0100000003", date(2024, 4, 2))
            .monto_facturado(dec!(100))
            .build(),
        // Malformed NCF: exporting April fails validation
        PurchaseRecordBuilder::new("c-4", "131234567", "B01-0004", date(2024, 4, 9))
            .build(),
    ];

    let exporter = Exporter::new(InMemorySource::new().with_purchases(compras));

    let march = Period::new(3, 2024).unwrap();
    match exporter.export_606(march, ExportFormat::Txt).await {
        Ok(artifact) => {
            println!("=== {} ({} registros) ===", artifact.file_name, artifact.record_count);
            println!("{}", String::from_utf8_lossy(&artifact.bytes));
        }
        Err(e) => eprintln!("{}", e.user_message()),
    }

    let april = Period::new(4, 2024).unwrap();
    let result = exporter.export_606(april, ExportFormat::Txt).await;
    if let Err(e) = &result {
        println!("=== Exportación {april} rechazada ===");
        println!("{}", e.user_message());
    }
    let outcome = ExportOutcome::from_result(&result);
    println!("success = {}, stage = {:?}", outcome.success, outcome.stage);
}
