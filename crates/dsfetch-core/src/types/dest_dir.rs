//! Validated extraction directory.

use crate::AcquisitionError;
use crate::Result;
use crate::SafePath;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// An existing directory that archive entries are written into.
///
/// The path is canonicalized on construction; entries are joined onto it
/// only through [`SafePath`], so every output path stays inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Wraps an existing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist, is not a directory or
    /// cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(AcquisitionError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("destination directory does not exist: {}", path.display()),
            )));
        }

        if !path.is_dir() {
            return Err(AcquisitionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            AcquisitionError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {e}", path.display()),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Creates the directory (and missing parents) if needed, then wraps it.
    ///
    /// Idempotent: an existing directory is accepted as is.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dsfetch_core::DestDir;
    ///
    /// let dest = DestDir::create("artifacts/data_ingestion")?;
    /// println!("extracting to {}", dest.as_path().display());
    /// # Ok::<(), dsfetch_core::AcquisitionError>(())
    /// ```
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        Self::new(path)
    }

    /// Returns the canonical path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a validated entry path onto this directory.
    #[inline]
    #[must_use]
    pub fn join(&self, safe_path: &SafePath) -> PathBuf {
        self.0.join(safe_path.as_path())
    }
}
