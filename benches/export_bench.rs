use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use dgii_formatos::core::*;
use dgii_formatos::encode::{self, EmptyPolicy, ExportFormat, SalesSeparator};
use dgii_formatos::export::Exporter;
use dgii_formatos::source::InMemorySource;
use dgii_formatos::{formato606, formato607};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, n % 28 + 1).unwrap()
}

fn build_purchases(count: u32) -> Vec<PurchaseRecord> {
    (1..=count)
        .map(|n| {
            PurchaseRecordBuilder::new(
                format!("c-{n}"),
                "131234567",
                format!("B01{n:08}"),
                day(n),
            )
            .monto_facturado(Decimal::new(i64::from(n) * 1_050, 2))
            .itbis_facturado(Decimal::new(i64::from(n) * 189, 2))
            .tipo_bien_servicio("02")
            .fecha_pago(day(n + 3))
            .build()
        })
        .collect()
}

fn build_sales(count: u32) -> Vec<SaleRecord> {
    (1..=count)
        .map(|n| {
            SaleRecordBuilder::new(format!("v-{n}"), "00112345678", format!("B02{n:08}"), day(n))
                .tipo_identificacion(SaleIdKind::Cedula)
                .tipo_comprobante(DocumentType::B02)
                .monto_facturado(Decimal::new(i64::from(n) * 2_500, 2))
                .itbis_facturado(Decimal::new(i64::from(n) * 450, 2))
                .forma_pago(PaymentMethod::Tarjeta)
                .build()
        })
        .collect()
}

fn bench_validate(c: &mut Criterion) {
    let purchases = build_purchases(1000);
    c.bench_function("validate_purchases_1000", |b| {
        b.iter(|| black_box(validate_purchases(black_box(&purchases))));
    });
}

fn bench_format_table(c: &mut Criterion) {
    let sales = build_sales(1000);
    c.bench_function("formato607_table_1000", |b| {
        b.iter(|| black_box(formato607::to_table(black_box(&sales))));
    });
}

fn bench_txt(c: &mut Criterion) {
    let purchases = build_purchases(1000);
    let sales = build_sales(1000);
    c.bench_function("formato606_txt_1000", |b| {
        b.iter(|| black_box(formato606::to_txt(black_box(&purchases))));
    });
    c.bench_function("formato607_txt_tab_1000", |b| {
        b.iter(|| black_box(formato607::to_txt(black_box(&sales), SalesSeparator::Tab)));
    });
}

fn bench_xlsx(c: &mut Criterion) {
    let table = formato606::to_table(&build_purchases(1000));
    c.bench_function("formato606_xlsx_1000", |b| {
        b.iter(|| {
            black_box(encode::encode(
                black_box(&table),
                ExportFormat::Xlsx,
                '|',
                EmptyPolicy::HeaderOnly,
            ))
        });
    });
}

fn bench_full_export(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let exporter = Exporter::new(
        InMemorySource::new()
            .with_purchases(build_purchases(1000))
            .with_sales(build_sales(1000)),
    );
    let march = Period::new(3, 2024).unwrap();

    c.bench_function("export_607_txt_1000", |b| {
        b.iter(|| black_box(runtime.block_on(exporter.export_607(march, ExportFormat::Txt))));
    });
}

criterion_group!(
    benches,
    bench_validate,
    bench_format_table,
    bench_txt,
    bench_xlsx,
    bench_full_export,
);
criterion_main!(benches);
