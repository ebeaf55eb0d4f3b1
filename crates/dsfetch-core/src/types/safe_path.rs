//! Validated relative path of an archive entry.

use crate::AcquisitionError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// An archive entry path that stays inside the extraction directory.
///
/// `SafePath` represents a path that has been validated to not contain:
/// - Parent directory components (`..`)
/// - Root, drive or UNC prefixes
/// - Null bytes
///
/// `.` components are dropped during validation, so `./a/./b.txt` becomes
/// `a/b.txt`.
///
/// # Examples
///
/// ```
/// use dsfetch_core::SafePath;
/// use std::path::Path;
///
/// let safe = SafePath::validate(Path::new("./sub/b.txt"))?;
/// assert_eq!(safe.as_path(), Path::new("sub/b.txt"));
///
/// assert!(SafePath::validate(Path::new("../etc/passwd")).is_err());
/// assert!(SafePath::validate(Path::new("/etc/passwd")).is_err());
/// # Ok::<(), dsfetch_core::AcquisitionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates and constructs a `SafePath`.
    ///
    /// # Errors
    ///
    /// - `AcquisitionError::PathTraversal` for `..`, absolute or prefixed
    ///   paths
    /// - `AcquisitionError::InvalidArchive` for null bytes or a path with no
    ///   normal components
    pub fn validate(path: &Path) -> Result<Self> {
        if path.as_os_str().as_encoded_bytes().contains(&0) {
            return Err(AcquisitionError::InvalidArchive(format!(
                "entry name contains null bytes: {}",
                path.display()
            )));
        }

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(AcquisitionError::PathTraversal {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(AcquisitionError::InvalidArchive(format!(
                "entry name has no path components: {:?}",
                path.display().to_string()
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for SafePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
