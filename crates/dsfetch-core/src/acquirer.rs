//! The dataset acquirer: download step, extraction step, and both in order.

use std::fs;
use std::io;

use tracing::error;
use tracing::info;
use tracing::warn;

use crate::AcquisitionConfig;
use crate::AcquisitionError;
use crate::AcquisitionReport;
use crate::CommandFetcher;
use crate::DownloadOutcome;
use crate::ExtractionReport;
use crate::Fetcher;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::Settings;
use crate::api::extract_zip_with_progress;
use crate::report::approx_kb;

/// Makes a dataset archive available locally and unpacks it.
///
/// Both steps log their outcome through `tracing` and return it, so a caller
/// can branch on failures instead of reading logs.
///
/// # Examples
///
/// ```no_run
/// use dsfetch_core::AcquisitionConfig;
/// use dsfetch_core::DatasetAcquirer;
///
/// let acquirer = DatasetAcquirer::new(AcquisitionConfig::new(
///     "https://drive.google.com/file/d/abc/view",
///     "artifacts/data.zip",
///     "artifacts/data",
/// ));
/// acquirer.ensure_downloaded()?;
/// let report = acquirer.extract_archive()?;
/// println!("{} files", report.files_extracted);
/// # Ok::<(), dsfetch_core::AcquisitionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DatasetAcquirer<F = CommandFetcher> {
    config: AcquisitionConfig,
    fetcher: F,
    abort_extraction_on_failure: bool,
}

impl DatasetAcquirer<CommandFetcher> {
    /// Creates an acquirer that downloads with `gdown --fuzzy`.
    #[must_use]
    pub fn new(config: AcquisitionConfig) -> Self {
        Self::with_fetcher(config, CommandFetcher::default())
    }

    /// Creates an acquirer from a settings file.
    ///
    /// # Errors
    ///
    /// Returns `AcquisitionError::Config` if a location is missing.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let config = settings.acquisition_config()?;
        Ok(
            Self::with_fetcher(config, CommandFetcher::from_settings(&settings.download))
                .abort_extraction_on_failure(settings.download.abort_extraction_on_failure),
        )
    }
}

impl<F: Fetcher> DatasetAcquirer<F> {
    /// Creates an acquirer that downloads through `fetcher`.
    pub fn with_fetcher(config: AcquisitionConfig, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            abort_extraction_on_failure: false,
        }
    }

    /// Skip extraction in [`acquire`](Self::acquire) when the download fails.
    ///
    /// Off by default: extraction still runs and reports on whatever archive
    /// is (or is not) on disk.
    #[must_use]
    pub fn abort_extraction_on_failure(mut self, abort: bool) -> Self {
        self.abort_extraction_on_failure = abort;
        self
    }

    /// The acquisition inputs.
    #[must_use]
    pub const fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// The fetcher used by the download step.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Downloads the archive unless a file already exists at the local path.
    ///
    /// # Errors
    ///
    /// Returns a download failure if the fetcher fails or leaves no file
    /// behind, or an I/O error if the archive's parent directory cannot be
    /// created. The failure is logged before it is returned.
    pub fn ensure_downloaded(&self) -> Result<DownloadOutcome> {
        let result = self.download();
        if let Err(err) = &result {
            error!("failed to download file: {err}");
        }
        result
    }

    fn download(&self) -> Result<DownloadOutcome> {
        let path = self.config.local_archive_path();

        if path.exists() {
            let size = fs::metadata(path)?.len();
            info!(
                "file already exists at {}, size: {}",
                path.display(),
                approx_kb(size)
            );
            return Ok(DownloadOutcome::AlreadyPresent { size });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        info!(
            "downloading {} with {}",
            self.config.source_location(),
            self.fetcher.name()
        );
        self.fetcher.fetch(self.config.source_location(), path)?;

        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AcquisitionError::NoDownloadOutput {
                    tool: self.fetcher.name().to_string(),
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        info!(
            "downloaded file to {}, size: {}",
            path.display(),
            approx_kb(size)
        );
        Ok(DownloadOutcome::Downloaded { size })
    }

    /// Extracts the local archive into the extraction directory.
    ///
    /// # Errors
    ///
    /// `MissingArchive`, `InvalidArchive`, `PathTraversal` or `Io`; each is
    /// logged before it is returned.
    pub fn extract_archive(&self) -> Result<ExtractionReport> {
        self.extract_archive_with_progress(&mut NoopProgress)
    }

    /// Like [`extract_archive`](Self::extract_archive), reporting progress.
    pub fn extract_archive_with_progress(
        &self,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let archive = self.config.local_archive_path();
        let output = self.config.extraction_directory();

        match extract_zip_with_progress(archive, output, progress) {
            Ok(report) => {
                info!(
                    "extracted zip file to {} ({} files, {} directories)",
                    output.display(),
                    report.files_extracted,
                    report.directories_created
                );
                Ok(report)
            }
            Err(err) => {
                match &err {
                    AcquisitionError::MissingArchive { path } => {
                        error!("zip file not found: {}", path.display());
                    }
                    AcquisitionError::InvalidArchive(_) | AcquisitionError::PathTraversal { .. } => {
                        error!("{} is not a valid zip file: {err}", archive.display());
                    }
                    _ => error!("failed to extract {}: {err}", archive.display()),
                }
                Err(err)
            }
        }
    }

    /// Runs the download step, then the extraction step.
    pub fn acquire(&self) -> AcquisitionReport {
        self.acquire_with_progress(&mut NoopProgress)
    }

    /// Like [`acquire`](Self::acquire), reporting extraction progress.
    pub fn acquire_with_progress(&self, progress: &mut dyn ProgressCallback) -> AcquisitionReport {
        let download = self.ensure_downloaded();

        if download.is_err() && self.abort_extraction_on_failure {
            warn!("skipping extraction because the download failed");
            return AcquisitionReport {
                download,
                extraction: None,
            };
        }

        let extraction = Some(self.extract_archive_with_progress(progress));
        AcquisitionReport {
            download,
            extraction,
        }
    }
}
