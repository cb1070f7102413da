#![cfg(feature = "core")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dgii_formatos::core::*;
use dgii_formatos::encode::{EncodeError, split_text};
use dgii_formatos::export::*;
use dgii_formatos::source::{FetchError, InMemorySource, RecordSource};
use dgii_formatos::{formato606, formato607};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn march() -> Period {
    Period::new(3, 2024).unwrap()
}

fn purchases() -> Vec<PurchaseRecord> {
    vec![
        PurchaseRecordBuilder::new("c-1", "131234567", "B0100000001", date(2024, 3, 4))
            .monto_facturado(dec!(15000))
            .itbis_facturado(dec!(2700))
            .build(),
        PurchaseRecordBuilder::new("c-2", "131234567", "B0100000002", date(2024, 2, 29))
            .monto_facturado(dec!(99))
            .build(),
        PurchaseRecordBuilder::new("c-3", "130987654", "B0100000003", date(2024, 3, 31))
            .build(),
    ]
}

fn sales() -> Vec<SaleRecord> {
    vec![
        SaleRecordBuilder::new("v-1", "131234567", "B0100000101", date(2024, 3, 15))
            .monto_facturado(dec!(1000))
            .itbis_facturado(dec!(180))
            .build(),
        SaleRecordBuilder::new("v-2", "131234567", "B0100000102", date(2024, 4, 1))
            .monto_facturado(dec!(5))
            .build(),
    ]
}

fn exporter() -> Exporter<InMemorySource> {
    Exporter::new(
        InMemorySource::new()
            .with_purchases(purchases())
            .with_sales(sales()),
    )
}

/// A source that is never reachable.
struct Offline;

#[async_trait]
impl RecordSource for Offline {
    async fn purchases(&self, _: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
        Err(FetchError::Unavailable("connection refused".into()))
    }

    async fn sales(&self, _: Period) -> Result<Vec<SaleRecord>, FetchError> {
        Err(FetchError::Unavailable("connection refused".into()))
    }
}

/// Counts calls so tests can check that nothing is retried.
#[derive(Default)]
struct Counting {
    calls: AtomicUsize,
}

#[async_trait]
impl RecordSource for Counting {
    async fn purchases(&self, _: Period) -> Result<Vec<PurchaseRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::Io("disk unplugged".into()))
    }

    async fn sales(&self, _: Period) -> Result<Vec<SaleRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Success paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn exports_606_txt_for_period() {
    let artifact = exporter()
        .export_606(march(), ExportFormat::Txt)
        .await
        .unwrap();

    assert_eq!(artifact.file_name, "formato606_3_2024.txt");
    assert_eq!(artifact.record_count, 2);
    assert_eq!(artifact.form, TaxForm::Formato606);
    assert_eq!(artifact.content_type, "text/plain; charset=utf-8");

    let txt = String::from_utf8(artifact.bytes).unwrap();
    assert_eq!(txt.lines().count(), 3);
    assert!(txt.contains("B0100000001"));
    assert!(!txt.contains("B0100000002"), "February record leaked into March");
}

#[tokio::test]
async fn exports_607_with_configured_separator() {
    let config = ExportConfigBuilder::new()
        .sales_separator(SalesSeparator::Tab)
        .build();
    let exporter = Exporter::with_config(InMemorySource::new().with_sales(sales()), config);

    let artifact = exporter
        .export_607(march(), ExportFormat::Txt)
        .await
        .unwrap();
    let txt = String::from_utf8(artifact.bytes).unwrap();
    assert_eq!(
        txt.lines().nth(1).unwrap(),
        "131234567\t1\tB0100000101\tB01\t15/03/2024\t1000.00\t180.00\t0.00\t0.00\t01"
    );
}

#[cfg(feature = "xlsx")]
#[tokio::test]
async fn xlsx_and_txt_carry_the_same_rows() {
    let exporter = exporter();
    let txt = exporter
        .export_606(march(), ExportFormat::Txt)
        .await
        .unwrap();
    let xlsx = exporter
        .export_606(march(), ExportFormat::Xlsx)
        .await
        .unwrap();

    assert_eq!(xlsx.file_name, "formato606_3_2024.xlsx");
    assert_eq!(xlsx.record_count, txt.record_count);
    assert!(xlsx.bytes.starts_with(b"PK"));

    // Both containers are encoded from the same formatted table.
    let selected = filter_by_period(&purchases(), march());
    let table = formato606::to_table(&selected);
    let lines = split_text(std::str::from_utf8(&txt.bytes).unwrap(), '|');
    assert_eq!(&lines[1..], table.rows.as_slice());
    assert_eq!(xlsx.bytes, dgii_formatos::encode::to_xlsx(&table).unwrap());
}

#[tokio::test]
async fn same_request_twice_gives_same_bytes() {
    let exporter = exporter();
    let a = exporter.export_607(march(), ExportFormat::Txt).await.unwrap();
    let b = exporter.export_607(march(), ExportFormat::Txt).await.unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Empty periods
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_606_period_gives_header_only_file() {
    let artifact = exporter()
        .export_606(Period::new(7, 2024).unwrap(), ExportFormat::Txt)
        .await
        .unwrap();
    assert_eq!(artifact.record_count, 0);
    let txt = String::from_utf8(artifact.bytes).unwrap();
    assert_eq!(txt, format!("{}\n", formato606::HEADERS.join("|")));
}

#[tokio::test]
async fn empty_607_period_is_an_encode_error() {
    let err = exporter()
        .export_607(Period::new(7, 2024).unwrap(), ExportFormat::Txt)
        .await
        .unwrap_err();
    assert_eq!(err.stage(), ExportStage::Encoding);
    assert!(matches!(
        err,
        ExportError::Encode(EncodeError::NothingToExport(TaxForm::Formato607))
    ));
    assert_eq!(err.to_string(), "No hay ventas para exportar");
}

#[tokio::test]
async fn uniform_policy_overrides_the_per_form_defaults() {
    let source = InMemorySource::new();

    let lenient = Exporter::with_config(
        &source,
        ExportConfigBuilder::new()
            .empty_policy(EmptyPolicy::HeaderOnly)
            .build(),
    );
    let artifact = lenient
        .export_607(march(), ExportFormat::Txt)
        .await
        .unwrap();
    assert_eq!(
        String::from_utf8(artifact.bytes).unwrap(),
        format!("{}\n", formato607::HEADERS.join(","))
    );

    let strict = Exporter::with_config(
        &source,
        ExportConfigBuilder::new()
            .empty_policy(EmptyPolicy::Reject)
            .build(),
    );
    let err = strict
        .export_606(march(), ExportFormat::Txt)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No hay compras para exportar");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_errors_refuse_the_whole_export() {
    let mut records = purchases();
    records[0].ncf = String::new();
    records[2].tipo_bien_servicio = "2".into();
    let exporter = Exporter::new(InMemorySource::new().with_purchases(records));

    let err = exporter
        .export_606(march(), ExportFormat::Txt)
        .await
        .unwrap_err();
    assert_eq!(err.stage(), ExportStage::Validating);

    // Positions refer to the period's record list (February record filtered out).
    let fields: Vec<_> = err
        .validation_errors()
        .iter()
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(fields, ["records[0].ncf", "records[1].tipoBienServicio"]);

    let outcome = ExportOutcome::from_result(&Err(err));
    assert!(!outcome.success);
    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.file_name.is_none());
}

#[tokio::test]
async fn unreachable_source_is_a_fetch_error() {
    let exporter = Exporter::new(Offline);
    let err = exporter
        .export_607(march(), ExportFormat::Xlsx)
        .await
        .unwrap_err();
    assert_eq!(err.stage(), ExportStage::Fetching);
    assert!(matches!(err, ExportError::Fetch(FetchError::Unavailable(_))));
    assert!(err.user_message().contains("Intente nuevamente"));
}

#[tokio::test]
async fn failures_are_not_retried() {
    let source = Counting::default();
    let exporter = Exporter::new(&source);
    assert!(exporter.export_606(march(), ExportFormat::Txt).await.is_err());
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    // Retrying is the caller's decision: another call, another fetch.
    assert!(exporter.export_606(march(), ExportFormat::Txt).await.is_err());
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

// ---------------------------------------------------------------------------
// Concurrency and sinks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_exports_are_independent() {
    let source = Arc::new(
        InMemorySource::new()
            .with_purchases(purchases())
            .with_sales(sales()),
    );
    let exporter = Arc::new(Exporter::new(source));

    let a = {
        let exporter = Arc::clone(&exporter);
        tokio::spawn(async move { exporter.export_606(march(), ExportFormat::Txt).await })
    };
    let b = {
        let exporter = Arc::clone(&exporter);
        tokio::spawn(async move {
            exporter
                .export_607(Period::new(4, 2024).unwrap(), ExportFormat::Txt)
                .await
        })
    };

    let a = a.await.unwrap().unwrap();
    let b = b.await.unwrap().unwrap();
    assert_eq!(a.file_name, "formato606_3_2024.txt");
    assert_eq!(b.file_name, "formato607_4_2024.txt");
    assert_eq!(b.record_count, 1);
}

#[tokio::test]
async fn artifact_can_be_saved_to_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = exporter()
        .export_606(march(), ExportFormat::Txt)
        .await
        .unwrap();
    let path = artifact.save_to_dir(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "formato606_3_2024.txt");
    assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);

    let result = Ok(artifact);
    let outcome = ExportOutcome::from_result(&result);
    assert!(outcome.success);
    assert_eq!(outcome.record_count, Some(2));
}

#[tokio::test]
async fn generic_request_dispatch() {
    let request = ExportRequest::new(TaxForm::Formato607, march(), ExportFormat::Txt);
    let artifact = exporter().export(request).await.unwrap();
    assert_eq!(artifact.form, TaxForm::Formato607);
    assert_eq!(artifact.period, march());
    assert_eq!(artifact.format, ExportFormat::Txt);
}

#[cfg(feature = "json")]
#[tokio::test]
async fn json_file_source_end_to_end() {
    use dgii_formatos::source::{JsonFileSource, RecordSet};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registros.json");
    let set = RecordSet {
        purchases: purchases(),
        sales: sales(),
    };
    std::fs::write(&path, serde_json::to_string_pretty(&set).unwrap()).unwrap();

    let exporter = Exporter::new(JsonFileSource::new(&path));
    let from_file = exporter
        .export_606(march(), ExportFormat::Txt)
        .await
        .unwrap();
    let from_memory = self::exporter()
        .export_606(march(), ExportFormat::Txt)
        .await
        .unwrap();
    assert_eq!(from_file.bytes, from_memory.bytes);

    std::fs::write(&path, "{ not json").unwrap();
    let err = exporter
        .export_607(march(), ExportFormat::Txt)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::Fetch(FetchError::Parse(_))));
}
