//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Status;
use crate::error::convert_acquisition_error;
use anyhow::Result;
use dsfetch_core::AcquisitionReport;
use dsfetch_core::DownloadOutcome;
use dsfetch_core::ExtractionReport;
use serde::Serialize;
use std::io;
use std::io::Write;
use std::path::Path;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct DownloadOutput {
    archive: String,
    status: &'static str,
    size_bytes: u64,
}

impl DownloadOutput {
    fn new(archive: &Path, outcome: &DownloadOutcome) -> Self {
        Self {
            archive: archive.display().to_string(),
            status: if outcome.fetched() {
                "downloaded"
            } else {
                "already_present"
            },
            size_bytes: outcome.size(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExtractionOutput {
    output_dir: String,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl ExtractionOutput {
    fn new(output_dir: &Path, report: &ExtractionReport) -> Self {
        Self {
            output_dir: output_dir.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        }
    }
}

/// One step of `run`: either its data or its error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StepOutput<T> {
    Ok(T),
    Failed { error: String, kind: &'static str },
}

impl<T> StepOutput<T> {
    fn from_result<U>(
        result: &dsfetch_core::Result<U>,
        ok: impl FnOnce(&U) -> T,
    ) -> Self {
        match result {
            Ok(value) => Self::Ok(ok(value)),
            Err(err) => Self::Failed {
                error: err.to_string(),
                kind: err.kind().as_str(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RunOutput {
    download: StepOutput<DownloadOutput>,
    extraction: Option<StepOutput<ExtractionOutput>>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_download_result(&self, archive: &Path, outcome: &DownloadOutcome) -> Result<()> {
        let output = JsonOutput::success("download", DownloadOutput::new(archive, outcome));
        Self::output(&output)
    }

    fn format_extraction_result(
        &self,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        let output = JsonOutput::success("extract", ExtractionOutput::new(output_dir, report));
        Self::output(&output)
    }

    fn format_acquisition_result(
        &self,
        archive: &Path,
        output_dir: &Path,
        report: &AcquisitionReport,
    ) -> Result<()> {
        let data = RunOutput {
            download: StepOutput::from_result(&report.download, |outcome| {
                DownloadOutput::new(archive, outcome)
            }),
            extraction: report.extraction.as_ref().map(|result| {
                StepOutput::from_result(result, |r| ExtractionOutput::new(output_dir, r))
            }),
        };

        let output = if report.is_success() {
            JsonOutput::success("run", data)
        } else {
            let error = report
                .errors()
                .next()
                .map_or_else(
                    || "extraction skipped".to_string(),
                    |err| format!("{:#}", convert_acquisition_error(err)),
                );
            JsonOutput {
                operation: "run".to_string(),
                status: Status::Error,
                data: Some(data),
                error: Some(error),
            }
        };
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use dsfetch_core::AcquisitionError;
    use std::path::PathBuf;

    #[test]
    fn test_download_output_status() {
        let fetched = DownloadOutput::new(
            Path::new("data.zip"),
            &DownloadOutcome::Downloaded { size: 42 },
        );
        let json = serde_json::to_value(&fetched).unwrap();
        assert_eq!(json["status"], "downloaded");
        assert_eq!(json["size_bytes"], 42);

        let cached = DownloadOutput::new(
            Path::new("data.zip"),
            &DownloadOutcome::AlreadyPresent { size: 7 },
        );
        assert_eq!(serde_json::to_value(&cached).unwrap()["status"], "already_present");
    }

    #[test]
    fn test_failed_step_carries_kind() {
        let result: dsfetch_core::Result<DownloadOutcome> =
            Err(AcquisitionError::MissingArchive {
                path: PathBuf::from("data.zip"),
            });
        let step = StepOutput::from_result(&result, |o| DownloadOutput::new(Path::new("x"), o));

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["kind"], "missing_archive");
        assert!(json["error"].as_str().unwrap().contains("data.zip"));
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let output = JsonOutput::<()>::error("extract", "boom");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
