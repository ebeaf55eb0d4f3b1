//! Log subscriber setup.

use anyhow::Context;
use anyhow::Result;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::IsTerminal;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

/// Default filter directive when `RUST_LOG` is unset.
pub const fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber: stderr always, plus `log_file` in append
/// mode when given.
pub fn init_logging(verbose: bool, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let file_layer = log_file
        .map(|path| -> Result<_> {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Ok(fmt::layer()
                .with_ansi(false)
                .with_writer(SharedFile(file)))
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .with(file_layer)
        .try_init()
        .context("logging already initialized")?;

    if let Some(path) = log_file {
        tracing::debug!("logging to {}", path.display());
    }
    Ok(())
}

/// Hands out clones of one append-mode file handle.
struct SharedFile(File);

impl<'a> MakeWriter<'a> for SharedFile {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map_or_else(|_| FileOrStderr::Stderr(io::stderr()), FileOrStderr::File)
    }
}

enum FileOrStderr {
    File(File),
    Stderr(io::Stderr),
}

impl Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(f) => f.write(buf),
            Self::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(f) => f.flush(),
            Self::Stderr(s) => s.flush(),
        }
    }
}
