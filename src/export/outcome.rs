use serde::{Deserialize, Serialize};

use super::{ExportArtifact, ExportError, ExportStage};
use crate::core::ValidationError;

/// Serializable result contract of an export.
///
/// Success: `{"success": true, "fileName": ..., "contentType": ..., "recordCount": n}`.
/// Failure: `{"success": false, "stage": ..., "message": ..., "errors": [...]}`,
/// with `errors` present only for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<ExportStage>,
    /// User-facing message (Spanish).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ExportOutcome {
    pub fn from_result(result: &Result<ExportArtifact, ExportError>) -> Self {
        match result {
            Ok(artifact) => Self {
                success: true,
                file_name: Some(artifact.file_name.clone()),
                content_type: Some(artifact.content_type.to_string()),
                record_count: Some(artifact.record_count),
                stage: None,
                message: None,
                errors: Vec::new(),
            },
            Err(e) => Self {
                success: false,
                file_name: None,
                content_type: None,
                record_count: None,
                stage: Some(e.stage()),
                message: Some(e.user_message()),
                errors: e.validation_errors().to_vec(),
            },
        }
    }
}

impl From<&Result<ExportArtifact, ExportError>> for ExportOutcome {
    fn from(result: &Result<ExportArtifact, ExportError>) -> Self {
        Self::from_result(result)
    }
}
