//! Fetching the remote archive.
//!
//! [`Fetcher`] is the seam between the acquirer and whatever moves bytes
//! from the source location to disk. [`CommandFetcher`] delegates to an
//! external download tool (`gdown` by default); anything else that can
//! write a file at a path (an HTTP client, a test double) can implement the
//! same trait.

use std::path::Path;
use std::process::Command;

use crate::AcquisitionError;
use crate::DownloadSettings;
use crate::Result;

/// Places the bytes of a remote archive at a local path.
pub trait Fetcher {
    /// Fetches `source` into `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive could not be fetched.
    fn fetch(&self, source: &str, destination: &Path) -> Result<()>;

    /// Short name used in log lines and error messages.
    fn name(&self) -> &str;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, source: &str, destination: &Path) -> Result<()> {
        (**self).fetch(source, destination)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Runs an external download program as a child process.
///
/// The program is invoked as
/// `<program> [--fuzzy] <source> -O <destination>` and inherits the
/// terminal, so its own progress output stays visible. Exit status zero is
/// the only success signal; output is never parsed.
///
/// # Examples
///
/// ```no_run
/// use dsfetch_core::CommandFetcher;
/// use dsfetch_core::Fetcher;
/// use std::path::Path;
///
/// let fetcher = CommandFetcher::new("gdown");
/// fetcher.fetch(
///     "https://drive.google.com/file/d/abc/view",
///     Path::new("artifacts/data.zip"),
/// )?;
/// # Ok::<(), dsfetch_core::AcquisitionError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFetcher {
    program: String,
    fuzzy: bool,
}

impl CommandFetcher {
    /// Creates a fetcher for `program` with flexible link resolution on.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            fuzzy: true,
        }
    }

    /// Creates a fetcher from the `[download]` settings.
    #[must_use]
    pub fn from_settings(settings: &DownloadSettings) -> Self {
        Self::new(settings.program.clone()).fuzzy(settings.fuzzy)
    }

    /// Enables or disables the `--fuzzy` flag.
    #[must_use]
    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Program that will be spawned.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the child process command without running it.
    #[must_use]
    pub fn command(&self, source: &str, destination: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        if self.fuzzy {
            cmd.arg("--fuzzy");
        }
        cmd.arg(source).arg("-O").arg(destination);
        cmd
    }
}

impl Default for CommandFetcher {
    fn default() -> Self {
        Self::from_settings(&DownloadSettings::default())
    }
}

impl Fetcher for CommandFetcher {
    fn fetch(&self, source: &str, destination: &Path) -> Result<()> {
        let mut cmd = self.command(source, destination);
        tracing::debug!(program = %self.program, "running {cmd:?}");

        let status = cmd.status().map_err(|e| AcquisitionError::ToolUnavailable {
            tool: self.program.clone(),
            source: e,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(AcquisitionError::DownloadFailed {
                tool: self.program.clone(),
                code: status.code(),
            })
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn args_of(cmd: &Command) -> Vec<&OsStr> {
        cmd.get_args().collect()
    }

    #[test]
    fn test_default_is_gdown_fuzzy() {
        let fetcher = CommandFetcher::default();
        assert_eq!(fetcher.program(), "gdown");
        assert_eq!(fetcher.name(), "gdown");

        let cmd = fetcher.command("https://x/y", Path::new("out/data.zip"));
        assert_eq!(cmd.get_program(), "gdown");
        assert_eq!(
            args_of(&cmd),
            ["--fuzzy", "https://x/y", "-O", "out/data.zip"]
        );
    }

    #[test]
    fn test_fuzzy_can_be_disabled() {
        let fetcher = CommandFetcher::new("gdown").fuzzy(false);
        let cmd = fetcher.command("src", Path::new("dst"));
        assert_eq!(args_of(&cmd), ["src", "-O", "dst"]);
    }

    #[test]
    fn test_from_settings() {
        let settings = DownloadSettings {
            program: "fetch-tool".to_string(),
            fuzzy: false,
            abort_extraction_on_failure: false,
        };
        let fetcher = CommandFetcher::from_settings(&settings);
        assert_eq!(fetcher.program(), "fetch-tool");
        assert_eq!(fetcher, CommandFetcher::new("fetch-tool").fuzzy(false));
    }

    #[test]
    fn test_missing_program_is_tool_unavailable() {
        let fetcher = CommandFetcher::new("dsfetch-no-such-download-tool");
        let err = fetcher.fetch("src", Path::new("dst")).unwrap_err();
        assert!(matches!(err, AcquisitionError::ToolUnavailable { .. }));
        assert!(err.is_download_failure());
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        // `true` ignores its arguments and exits 0.
        let fetcher = CommandFetcher::new("true");
        assert!(fetcher.fetch("src", Path::new("dst")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_download_failure() {
        let fetcher = CommandFetcher::new("false");
        let err = fetcher.fetch("src", Path::new("dst")).unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::DownloadFailed { code: Some(1), .. }
        ));
    }

    #[test]
    fn test_reference_forwards() {
        fn name_of<F: Fetcher>(fetcher: F) -> String {
            fetcher.name().to_string()
        }

        let fetcher = CommandFetcher::new("gdown");
        assert_eq!(name_of(&fetcher), "gdown");
    }
}
