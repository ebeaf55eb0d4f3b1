//! Output formatter trait for CLI results.

use anyhow::Result;
use dsfetch_core::AcquisitionReport;
use dsfetch_core::DownloadOutcome;
use dsfetch_core::ExtractionReport;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of the download step
    fn format_download_result(&self, archive: &Path, outcome: &DownloadOutcome) -> Result<()>;

    /// Format extraction result
    fn format_extraction_result(&self, output_dir: &Path, report: &ExtractionReport)
    -> Result<()>;

    /// Format the combined result of both steps, including any failures
    fn format_acquisition_result(
        &self,
        archive: &Path,
        output_dir: &Path,
        report: &AcquisitionReport,
    ) -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
