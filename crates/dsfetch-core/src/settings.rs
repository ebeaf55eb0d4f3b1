//! On-disk settings file (TOML).
//!
//! ```toml
//! [data_ingestion]
//! root_dir = "artifacts/data_ingestion"
//! source_url = "https://drive.google.com/file/d/<id>/view"
//! local_data_file = "artifacts/data_ingestion/data.zip"
//! unzip_dir = "artifacts/data_ingestion"
//!
//! [download]
//! program = "gdown"
//! fuzzy = true
//! abort_extraction_on_failure = false
//! ```
//!
//! Every key is optional in the file so that command-line flags can fill the
//! gaps; [`Settings::acquisition_config`] reports whatever is still missing.

use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::AcquisitionConfig;
use crate::AcquisitionError;
use crate::DownloadSettings;
use crate::Result;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "config/config.toml";

/// The `[data_ingestion]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataIngestionSettings {
    /// Artifact root prepared before ingestion starts.
    pub root_dir: Option<PathBuf>,

    /// Remote archive reference.
    pub source_url: Option<String>,

    /// Local archive path.
    pub local_data_file: Option<PathBuf>,

    /// Extraction directory.
    pub unzip_dir: Option<PathBuf>,
}

/// Parsed settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Locations of the dataset.
    pub data_ingestion: DataIngestionSettings,

    /// Download tool options.
    pub download: DownloadSettings,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AcquisitionError::Config(format!("invalid settings: {e}")))
    }

    /// Loads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns `AcquisitionError::Config` if the file is missing or is not
    /// valid settings TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AcquisitionError::Config(format!(
                "cannot read settings file {}: {e}",
                path.display()
            ))
        })?;
        let settings = Self::from_toml_str(&text).map_err(|e| match e {
            AcquisitionError::Config(msg) => {
                AcquisitionError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        tracing::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Loads settings from `path`, or returns defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Creates the artifact root directory, if one is configured.
    pub fn create_directories(&self) -> Result<()> {
        if let Some(root) = &self.data_ingestion.root_dir {
            fs::create_dir_all(root)?;
            tracing::info!("created directory at: {}", root.display());
        }
        Ok(())
    }

    /// Builds the acquisition inputs.
    ///
    /// # Errors
    ///
    /// Returns `AcquisitionError::Config` naming the first missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsfetch_core::Settings;
    ///
    /// let settings = Settings::from_toml_str(
    ///     r#"
    ///     [data_ingestion]
    ///     source_url = "https://example.com/data.zip"
    ///     local_data_file = "artifacts/data.zip"
    ///     unzip_dir = "artifacts"
    ///     "#,
    /// )?;
    /// let config = settings.acquisition_config()?;
    /// assert_eq!(config.source_location(), "https://example.com/data.zip");
    /// # Ok::<(), dsfetch_core::AcquisitionError>(())
    /// ```
    pub fn acquisition_config(&self) -> Result<AcquisitionConfig> {
        let ingestion = &self.data_ingestion;
        let source = ingestion
            .source_url
            .clone()
            .ok_or_else(|| missing("data_ingestion.source_url"))?;
        let archive = ingestion
            .local_data_file
            .clone()
            .ok_or_else(|| missing("data_ingestion.local_data_file"))?;
        let unzip_dir = ingestion
            .unzip_dir
            .clone()
            .ok_or_else(|| missing("data_ingestion.unzip_dir"))?;
        Ok(AcquisitionConfig::new(source, archive, unzip_dir))
    }
}

fn missing(key: &str) -> AcquisitionError {
    AcquisitionError::Config(format!("missing setting `{key}`"))
}
