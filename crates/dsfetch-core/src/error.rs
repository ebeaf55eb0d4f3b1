//! Error types for dataset acquisition.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `AcquisitionError`.
pub type Result<T> = std::result::Result<T, AcquisitionError>;

/// Broad failure classes reported to callers.
///
/// Several [`AcquisitionError`] variants map onto the same class; use
/// [`AcquisitionError::kind`] when only the class matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The archive could not be downloaded.
    Download,
    /// No archive exists at the expected local path.
    MissingArchive,
    /// The archive exists but is not a usable zip archive.
    InvalidArchive,
    /// Filesystem operation failed.
    Io,
    /// Configuration could not be loaded or is incomplete.
    Config,
}

impl FailureKind {
    /// Returns a stable lowercase identifier, suitable for machine output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Download => "download_failure",
            Self::MissingArchive => "missing_archive",
            Self::InvalidArchive => "invalid_archive",
            Self::Io => "io",
            Self::Config => "config",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while downloading or extracting a dataset archive.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The external download tool could not be started.
    #[error("download tool `{tool}` could not be started: {source}")]
    ToolUnavailable {
        /// Program that was invoked.
        tool: String,
        /// Spawn error reported by the OS.
        source: std::io::Error,
    },

    /// The external download tool exited with a non-zero status.
    #[error("download tool `{tool}` exited with {}", exit_label(.code))]
    DownloadFailed {
        /// Program that was invoked.
        tool: String,
        /// Exit code, `None` when the process was killed by a signal.
        code: Option<i32>,
    },

    /// The download tool reported success but produced no file.
    #[error("download tool `{tool}` reported success but no file exists at {path}")]
    NoDownloadOutput {
        /// Program that was invoked.
        tool: String,
        /// Path where the archive was expected.
        path: PathBuf,
    },

    /// Archive file does not exist.
    #[error("archive file not found: {path}")]
    MissingArchive {
        /// Path where the archive was expected.
        path: PathBuf,
    },

    /// Archive is corrupted or not a zip archive.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An entry name would resolve outside the extraction directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: PathBuf,
    },

    /// Configuration is unreadable or incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |code| format!("exit code {code}"),
    )
}

impl AcquisitionError {
    /// Returns the failure class of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsfetch_core::AcquisitionError;
    /// use dsfetch_core::FailureKind;
    ///
    /// let err = AcquisitionError::DownloadFailed {
    ///     tool: "gdown".to_string(),
    ///     code: Some(1),
    /// };
    /// assert_eq!(err.kind(), FailureKind::Download);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::ToolUnavailable { .. }
            | Self::DownloadFailed { .. }
            | Self::NoDownloadOutput { .. } => FailureKind::Download,
            Self::MissingArchive { .. } => FailureKind::MissingArchive,
            Self::InvalidArchive(_) | Self::PathTraversal { .. } => FailureKind::InvalidArchive,
            Self::Io(_) => FailureKind::Io,
            Self::Config(_) => FailureKind::Config,
        }
    }

    /// Returns `true` if the download step failed.
    #[must_use]
    pub const fn is_download_failure(&self) -> bool {
        matches!(self.kind(), FailureKind::Download)
    }

    /// Returns `true` if the archive is absent or unusable.
    ///
    /// ```
    /// use dsfetch_core::AcquisitionError;
    ///
    /// let err = AcquisitionError::InvalidArchive("bad header".to_string());
    /// assert!(err.is_archive_problem());
    ///
    /// let err = AcquisitionError::Config("missing source_url".to_string());
    /// assert!(!err.is_archive_problem());
    /// ```
    #[must_use]
    pub const fn is_archive_problem(&self) -> bool {
        matches!(
            self.kind(),
            FailureKind::MissingArchive | FailureKind::InvalidArchive
        )
    }

    /// Returns the filesystem path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::NoDownloadOutput { path, .. }
            | Self::MissingArchive { path }
            | Self::PathTraversal { path } => Some(path),
            _ => None,
        }
    }
}
