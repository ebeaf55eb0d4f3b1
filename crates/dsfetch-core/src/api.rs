//! High-level extraction API.

use std::path::Path;

use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::extraction::ZipExtractor;

/// Extracts the zip archive at `archive_path` into `output_dir`.
///
/// The archive is opened and parsed before `output_dir` is created, so a
/// missing or corrupt archive leaves the filesystem untouched.
///
/// # Errors
///
/// Returns an error if:
/// - No file exists at `archive_path` (`MissingArchive`)
/// - The file is not a valid zip archive (`InvalidArchive`)
/// - An entry name escapes `output_dir` (`PathTraversal`)
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use dsfetch_core::extract_zip;
///
/// let report = extract_zip("artifacts/data.zip", "artifacts/data")?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok::<(), dsfetch_core::AcquisitionError>(())
/// ```
pub fn extract_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
) -> Result<ExtractionReport> {
    extract_zip_with_progress(archive_path, output_dir, &mut NoopProgress)
}

/// Extracts a zip archive, reporting progress through `progress`.
pub fn extract_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let mut extractor = ZipExtractor::open(archive_path.as_ref())?;
    extractor.extract(output_dir.as_ref(), progress)
}
