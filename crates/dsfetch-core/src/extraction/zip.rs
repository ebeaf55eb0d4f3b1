//! ZIP archive extraction.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::time::Instant;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::AcquisitionError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::types::DestDir;
use crate::types::SafePath;

/// Entry metadata validated up front.
#[derive(Debug)]
struct PlannedEntry {
    index: usize,
    path: SafePath,
    is_dir: bool,
}

/// Zip archive reader that expands entries into a directory.
///
/// Opening the extractor parses the central directory, so an instance only
/// exists for a well-formed archive. The archive handle is released when the
/// extractor is dropped.
///
/// # Examples
///
/// ```no_run
/// use dsfetch_core::NoopProgress;
/// use dsfetch_core::extraction::ZipExtractor;
/// use std::path::Path;
///
/// let mut extractor = ZipExtractor::open(Path::new("data.zip"))?;
/// let report = extractor.extract(Path::new("out"), &mut NoopProgress)?;
/// println!("extracted {} files", report.files_extracted);
/// # Ok::<(), dsfetch_core::AcquisitionError>(())
/// ```
#[derive(Debug)]
pub struct ZipExtractor<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl ZipExtractor<File> {
    /// Opens the archive at `path`.
    ///
    /// # Errors
    ///
    /// - `AcquisitionError::MissingArchive` if no file exists at `path`
    /// - `AcquisitionError::InvalidArchive` if the file is not a zip archive
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AcquisitionError::MissingArchive {
                path: path.to_path_buf(),
            },
            _ => AcquisitionError::Io(e),
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipExtractor<R> {
    /// Parses a zip archive from `source`.
    ///
    /// Any parse failure is reported as `InvalidArchive`: the bytes were
    /// readable, they just are not a zip stream.
    pub fn new(source: R) -> Result<Self> {
        let archive = ZipArchive::new(source)
            .map_err(|e| AcquisitionError::InvalidArchive(format!("not a zip archive: {e}")))?;
        Ok(Self { archive })
    }

    /// Number of entries in the archive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Expands every entry into `output_dir`, creating it if needed.
    ///
    /// All entry names are validated first; if any would escape
    /// `output_dir`, nothing is written and `output_dir` is not created.
    /// Existing files are overwritten, so extracting the same archive twice
    /// yields the same tree.
    ///
    /// # Errors
    ///
    /// - `AcquisitionError::PathTraversal` for an unsafe entry name
    /// - `AcquisitionError::InvalidArchive` for encrypted, unsupported or
    ///   corrupt entries
    /// - `AcquisitionError::Io` if writing fails
    pub fn extract(
        &mut self,
        output_dir: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let plan = self.plan()?;
        let dest = DestDir::create(output_dir)?;

        let total = plan.len();
        let mut report = ExtractionReport::new();

        for (i, entry) in plan.iter().enumerate() {
            let rel = entry.path.as_path();
            progress.on_entry_start(rel, total, i + 1);

            let output_path = dest.join(&entry.path);
            if entry.is_dir {
                fs::create_dir_all(&output_path)?;
                report.directories_created += 1;
            } else {
                let written = self.extract_file(entry.index, &output_path)?;
                report.files_extracted += 1;
                report.bytes_written = report.bytes_written.saturating_add(written);
                progress.on_bytes_written(written);
            }

            tracing::debug!("extracted {}", rel.display());
            progress.on_entry_complete(rel);
        }

        report.duration = start.elapsed();
        progress.on_complete();
        Ok(report)
    }

    fn plan(&mut self) -> Result<Vec<PlannedEntry>> {
        let mut plan = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let entry = self.archive.by_index_raw(index)?;
            let name = Path::new(entry.name());
            let is_dir = entry.is_dir();

            // `./` names the destination itself, which is created anyway.
            if is_dir && names_root(name) {
                continue;
            }

            plan.push(PlannedEntry {
                index,
                path: SafePath::validate(name)?,
                is_dir,
            });
        }
        Ok(plan)
    }

    fn extract_file(&mut self, index: usize, output_path: &Path) -> Result<u64> {
        let mut entry = self.archive.by_index(index)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(output_path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        let written = io::copy(&mut entry, &mut writer).map_err(entry_data_error)?;
        writer.flush()?;
        Ok(written)
    }
}

fn names_root(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::CurDir))
}

/// Corrupt compressed data and checksum mismatches surface as these kinds.
fn entry_data_error(err: io::Error) -> AcquisitionError {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            AcquisitionError::InvalidArchive(format!("corrupt entry data: {err}"))
        }
        _ => AcquisitionError::Io(err),
    }
}

impl From<ZipError> for AcquisitionError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(e) => entry_data_error(e),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
