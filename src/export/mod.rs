//! Export orchestrator: fetch → validate → format → encode.
//!
//! Each invocation runs its stages strictly in order and ends in exactly one
//! of two terminal states: an [`ExportArtifact`] or an [`ExportError`] that
//! names the failing [`ExportStage`]. Nothing is retried internally; a
//! caller that wants a retry simply calls [`Exporter::export`] again.
//!
//! # Example
//!
//! ```no_run
//! use dgii_formatos::export::*;
//! use dgii_formatos::source::InMemorySource;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let ventas: Vec<dgii_formatos::SaleRecord> = Vec::new();
//!
//! let exporter = Exporter::new(InMemorySource::new().with_sales(ventas));
//! match exporter.export_607(Period::new(3, 2024)?, ExportFormat::Txt).await {
//!     Ok(artifact) => {
//!         artifact.save_to_dir(std::env::temp_dir())?;
//!     }
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod outcome;

pub use config::{ExportConfig, ExportConfigBuilder};
pub use outcome::ExportOutcome;

pub use crate::core::{Period, TaxForm};
pub use crate::encode::{EmptyPolicy, ExportFormat, SalesSeparator};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Instrument, debug, info, warn};

use crate::core::{ValidationError, validate_purchases, validate_sales};
use crate::encode::{self, EncodeError, PURCHASES_SEPARATOR};
use crate::source::{FetchError, RecordSource, Records, fetch_records_for_period};
use crate::{formato606, formato607};

/// One export invocation: which form, which period, which container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    pub form: TaxForm,
    pub period: Period,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn new(form: TaxForm, period: Period, format: ExportFormat) -> Self {
        Self {
            form,
            period,
            format,
        }
    }
}

/// Non-terminal pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStage {
    Fetching,
    Validating,
    Encoding,
}

impl std::fmt::Display for ExportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fetching => "fetching",
            Self::Validating => "validating",
            Self::Encoding => "encoding",
        })
    }
}

/// Terminal failure of an export invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The record source failed; no partial result.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// One or more field violations; the export is refused entirely.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// The encoder refused the formatted rows.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl ExportError {
    /// The stage the pipeline was in when it failed.
    pub fn stage(&self) -> ExportStage {
        match self {
            Self::Fetch(_) => ExportStage::Fetching,
            Self::Validation(_) => ExportStage::Validating,
            Self::Encode(_) => ExportStage::Encoding,
        }
    }

    /// Field-level errors; empty unless this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Message to show the user (Spanish).
    ///
    /// Validation failures list every field so the source data can be
    /// corrected; fetch and encode failures ask the user to retry.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => {
                let mut msg = String::from("Corrija los siguientes errores antes de exportar:");
                for e in errors {
                    msg.push_str("\n- ");
                    msg.push_str(&e.to_string());
                }
                msg
            }
            Self::Encode(e @ EncodeError::NothingToExport(_)) => e.to_string(),
            Self::Fetch(_) => {
                "No se pudieron obtener los registros del período. Intente nuevamente.".into()
            }
            Self::Encode(_) => "No se pudo generar el archivo. Intente nuevamente.".into(),
        }
    }
}

/// A finished export, ready for a download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `formato{606,607}_{month}_{year}.{txt,xlsx}`.
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub form: TaxForm,
    pub period: Period,
    pub format: ExportFormat,
    /// Number of data rows (header excluded).
    pub record_count: usize,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name and return the path.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Deterministic artifact name, e.g. `formato606_3_2024.txt` (month unpadded).
pub fn artifact_file_name(form: TaxForm, period: Period, format: ExportFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        form.file_stem(),
        period.month(),
        period.year(),
        format.extension()
    )
}

/// Runs export invocations against a [`RecordSource`].
///
/// Holds no mutable state: concurrent exports through one `Exporter` are
/// independent.
#[derive(Debug, Clone)]
pub struct Exporter<S> {
    source: S,
    config: ExportConfig,
}

impl<S: RecordSource> Exporter<S> {
    /// Exporter with the default [`ExportConfig`].
    pub fn new(source: S) -> Self {
        Self::with_config(source, ExportConfig::default())
    }

    pub fn with_config(source: S, config: ExportConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Export the purchases of `period` as Formato 606.
    pub async fn export_606(
        &self,
        period: Period,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        self.export(ExportRequest::new(TaxForm::Formato606, period, format))
            .await
    }

    /// Export the sales of `period` as Formato 607.
    pub async fn export_607(
        &self,
        period: Period,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        self.export(ExportRequest::new(TaxForm::Formato607, period, format))
            .await
    }

    /// Run one export invocation to a terminal state.
    pub async fn export(&self, request: ExportRequest) -> Result<ExportArtifact, ExportError> {
        let span = tracing::info_span!(
            "export",
            form = %request.form,
            period = %request.period,
            format = ?request.format
        );
        async {
            info!("export started");
            let result = self.run(request).await;
            match &result {
                Ok(artifact) => info!(
                    file = %artifact.file_name,
                    records = artifact.record_count,
                    bytes = artifact.bytes.len(),
                    "export succeeded"
                ),
                Err(e) => warn!(stage = %e.stage(), error = %e, "export failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: ExportRequest) -> Result<ExportArtifact, ExportError> {
        debug!(stage = %ExportStage::Fetching);
        let records = fetch_records_for_period(&self.source, request.form, request.period).await?;

        debug!(stage = %ExportStage::Validating, records = records.len());
        let errors = match &records {
            Records::Purchases(r) => validate_purchases(r),
            Records::Sales(r) => validate_sales(r),
        };
        if !errors.is_empty() {
            return Err(ExportError::Validation(errors));
        }

        debug!(stage = %ExportStage::Encoding);
        let (table, policy, separator) = match &records {
            Records::Purchases(r) => (
                formato606::to_table(r),
                self.config.empty_purchases,
                PURCHASES_SEPARATOR,
            ),
            Records::Sales(r) => (
                formato607::to_table(r),
                self.config.empty_sales,
                self.config.sales_separator.as_char(),
            ),
        };
        let bytes = encode::encode(&table, request.format, separator, policy)?;

        Ok(ExportArtifact {
            file_name: artifact_file_name(request.form, request.period, request.format),
            content_type: request.format.content_type(),
            bytes,
            form: request.form,
            period: request.period,
            format: request.format,
            record_count: table.rows.len(),
        })
    }
}
