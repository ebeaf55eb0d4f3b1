//! Acquisition inputs: where the archive comes from and where it goes.

use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Immutable description of one dataset acquisition.
///
/// The acquirer reads these three locations and never mutates them.
///
/// # Examples
///
/// ```
/// use dsfetch_core::AcquisitionConfig;
/// use std::path::Path;
///
/// let config = AcquisitionConfig::new(
///     "https://example.com/data.zip",
///     "artifacts/data.zip",
///     "artifacts/data",
/// );
/// assert_eq!(config.local_archive_path(), Path::new("artifacts/data.zip"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionConfig {
    source_location: String,
    local_archive_path: PathBuf,
    extraction_directory: PathBuf,
}

impl AcquisitionConfig {
    /// Creates a configuration from its three locations.
    pub fn new(
        source_location: impl Into<String>,
        local_archive_path: impl Into<PathBuf>,
        extraction_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_location: source_location.into(),
            local_archive_path: local_archive_path.into(),
            extraction_directory: extraction_directory.into(),
        }
    }

    /// Remote reference handed to the fetcher.
    #[must_use]
    pub fn source_location(&self) -> &str {
        &self.source_location
    }

    /// Where the archive is, or will be, stored.
    #[must_use]
    pub fn local_archive_path(&self) -> &Path {
        &self.local_archive_path
    }

    /// Where the archive contents are unpacked.
    #[must_use]
    pub fn extraction_directory(&self) -> &Path {
        &self.extraction_directory
    }
}

/// How the default command-line fetcher is run, and what happens after it
/// fails.
///
/// Default values:
/// - `program`: `gdown`
/// - `fuzzy`: true (pass `--fuzzy` so shareable links resolve)
/// - `abort_extraction_on_failure`: false (extraction still runs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Download program looked up on `PATH`.
    pub program: String,

    /// Request flexible link resolution from the download tool.
    pub fuzzy: bool,

    /// Skip extraction when the download step fails.
    pub abort_extraction_on_failure: bool,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            program: "gdown".to_string(),
            fuzzy: true,
            abort_extraction_on_failure: false,
        }
    }
}
