//! Error conversion utilities for CLI.
//!
//! Converts dsfetch-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use dsfetch_core::AcquisitionError;
use std::fmt;

/// Converts an `AcquisitionError` to a user-friendly anyhow error with a hint.
pub fn convert_acquisition_error(err: &AcquisitionError) -> anyhow::Error {
    match err {
        AcquisitionError::ToolUnavailable { tool, source } => {
            anyhow!(
                "Download tool '{tool}' could not be started: {source}\n\
                 HINT: Install it (for gdown: `pip install gdown`) or choose another program with --tool."
            )
        }
        AcquisitionError::DownloadFailed { tool, .. } => {
            anyhow!(
                "Download failed: {err}\n\
                 HINT: Check that the link is shared publicly and reachable, then retry. \
                 '{tool}' printed its own diagnostics above."
            )
        }
        AcquisitionError::NoDownloadOutput { path, .. } => {
            anyhow!(
                "Download produced no file at '{}'\n\
                 HINT: The tool may have saved the file under another name. Check its output.",
                path.display()
            )
        }
        AcquisitionError::MissingArchive { path } => {
            anyhow!(
                "Archive not found: {}\n\
                 HINT: Run `dsfetch download` first, or pass the archive path explicitly.",
                path.display()
            )
        }
        AcquisitionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid zip archive: {reason}\n\
                 HINT: The download may have saved an HTML page instead of the file. \
                 Delete the archive and download it again."
            )
        }
        AcquisitionError::PathTraversal { path } => {
            anyhow!(
                "Security violation: archive entry '{}' escapes the output directory\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                path.display()
            )
        }
        AcquisitionError::Config(message) => {
            anyhow!(
                "Configuration error: {message}\n\
                 HINT: Fix the settings file given with --config, or pass the value on the command line."
            )
        }
        AcquisitionError::Io(io_err) => anyhow!("I/O error: {io_err}"),
    }
}

/// Adds CLI context to a library result.
pub fn add_acquisition_context<T>(result: Result<T, AcquisitionError>) -> anyhow::Result<T> {
    result.map_err(|e| convert_acquisition_error(&e))
}

/// Error for a value that neither the command line nor the settings supply.
pub fn missing_value(what: &str, flag: &str, key: &str) -> anyhow::Error {
    anyhow!(
        "No {what} given\n\
         HINT: Pass {flag}, or set `{key}` in the settings file."
    )
}

/// Marks a failure whose details the formatter has already printed.
#[derive(Debug)]
pub struct AlreadyReported;

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dataset acquisition failed")
    }
}

impl std::error::Error for AlreadyReported {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_missing_tool() {
        let err = AcquisitionError::ToolUnavailable {
            tool: "gdown".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = format!("{:?}", convert_acquisition_error(&err));
        assert!(msg.contains("'gdown' could not be started"));
        assert!(msg.contains("pip install gdown"));
    }

    #[test]
    fn test_convert_download_failed_keeps_exit_code() {
        let err = AcquisitionError::DownloadFailed {
            tool: "gdown".to_string(),
            code: Some(1),
        };
        let msg = format!("{:?}", convert_acquisition_error(&err));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_missing_archive() {
        let err = AcquisitionError::MissingArchive {
            path: PathBuf::from("artifacts/data.zip"),
        };
        let msg = format!("{:?}", convert_acquisition_error(&err));
        assert!(msg.contains("artifacts/data.zip"));
        assert!(msg.contains("dsfetch download"));
    }

    #[test]
    fn test_convert_path_traversal() {
        let err = AcquisitionError::PathTraversal {
            path: PathBuf::from("../../etc/passwd"),
        };
        let msg = format!("{:?}", convert_acquisition_error(&err));
        assert!(msg.contains("Security violation"));
        assert!(msg.contains("../../etc/passwd"));
    }

    #[test]
    fn test_missing_value_names_flag_and_key() {
        let msg = missing_value("source", "--source", "data_ingestion.source_url").to_string();
        assert!(msg.contains("--source"));
        assert!(msg.contains("data_ingestion.source_url"));
    }

    #[test]
    fn test_already_reported_downcast() {
        let err = anyhow::Error::new(AlreadyReported);
        assert!(err.is::<AlreadyReported>());
    }
}
