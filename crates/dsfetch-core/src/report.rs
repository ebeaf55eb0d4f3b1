//! Outcomes of the download and extraction steps.

use std::path::Path;
use std::time::Duration;

use crate::AcquisitionError;
use crate::Result;

/// What the download step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The archive was already on disk; the fetcher was not invoked.
    AlreadyPresent {
        /// Size of the existing archive in bytes.
        size: u64,
    },
    /// The fetcher ran and produced the archive.
    Downloaded {
        /// Size of the downloaded archive in bytes.
        size: u64,
    },
}

impl DownloadOutcome {
    /// Size in bytes of the archive on disk.
    #[must_use]
    pub const fn size(&self) -> u64 {
        match self {
            Self::AlreadyPresent { size } | Self::Downloaded { size } => *size,
        }
    }

    /// Returns `true` if the fetcher was invoked.
    #[must_use]
    pub const fn fetched(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

/// Report of an archive extraction operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of files successfully extracted.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}

/// Combined result of [`DatasetAcquirer::acquire`](crate::DatasetAcquirer::acquire).
#[derive(Debug)]
pub struct AcquisitionReport {
    /// Result of the download step.
    pub download: Result<DownloadOutcome>,

    /// Result of the extraction step; `None` when it was skipped because the
    /// download failed and the acquirer aborts on download failure.
    pub extraction: Option<Result<ExtractionReport>>,
}

impl AcquisitionReport {
    /// Returns `true` if both steps ran and succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.download.is_ok() && matches!(self.extraction, Some(Ok(_)))
    }

    /// Returns `true` if extraction was skipped.
    #[must_use]
    pub fn extraction_skipped(&self) -> bool {
        self.extraction.is_none()
    }

    /// Iterates over the errors of both steps, download first.
    pub fn errors(&self) -> impl Iterator<Item = &AcquisitionError> {
        let download = self.download.as_ref().err();
        let extraction = self.extraction.as_ref().and_then(|r| r.as_ref().err());
        download.into_iter().chain(extraction)
    }
}

/// Callback trait for progress reporting during extraction.
///
/// # Examples
///
/// ```
/// use dsfetch_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("{current}/{total}: {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when starting to process an entry.
    ///
    /// `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after file data has been written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the entire operation is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

/// Renders a byte count as whole kilobytes, e.g. `~ 144 KB`.
///
/// ```
/// assert_eq!(dsfetch_core::report::approx_kb(2048), "~ 2 KB");
/// assert_eq!(dsfetch_core::report::approx_kb(100), "~ 0 KB");
/// ```
#[must_use]
pub fn approx_kb(bytes: u64) -> String {
    format!("~ {} KB", bytes.saturating_add(512) / 1024)
}
