//! Subcommand implementations.

pub mod completion;
pub mod download;
pub mod extract;
pub mod run;

use crate::cli::FetchArgs;
use crate::error::add_acquisition_context;
use crate::error::missing_value;
use anyhow::Result;
use dsfetch_core::CommandFetcher;
use dsfetch_core::Settings;
use dsfetch_core::settings::DEFAULT_SETTINGS_PATH;
use std::path::Path;
use std::path::PathBuf;

/// Loads the settings file.
///
/// An explicitly named file must exist; the default location is optional.
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let result = match config {
        Some(path) => Settings::load(path),
        None => Settings::load_or_default(Path::new(DEFAULT_SETTINGS_PATH)),
    };
    add_acquisition_context(result)
}

/// Picks the command-line value, then the settings value.
fn require<T: Clone>(
    cli: Option<&T>,
    settings: Option<&T>,
    what: &str,
    flag: &str,
    key: &str,
) -> Result<T> {
    cli.or(settings)
        .cloned()
        .ok_or_else(|| missing_value(what, flag, key))
}

/// Source location and archive path for commands that download.
struct FetchTarget {
    source: String,
    archive: PathBuf,
    fetcher: CommandFetcher,
}

impl FetchTarget {
    fn resolve(args: &FetchArgs, settings: &Settings) -> Result<Self> {
        let ingestion = &settings.data_ingestion;
        let source = require(
            args.source.as_ref(),
            ingestion.source_url.as_ref(),
            "source location",
            "--source",
            "data_ingestion.source_url",
        )?;
        let archive = require(
            args.archive.as_ref(),
            ingestion.local_data_file.as_ref(),
            "archive path",
            "--archive",
            "data_ingestion.local_data_file",
        )?;

        let mut fetcher = CommandFetcher::from_settings(&settings.download);
        if let Some(tool) = &args.tool {
            fetcher = CommandFetcher::new(tool.as_str()).fuzzy(settings.download.fuzzy);
        }
        if args.no_fuzzy {
            fetcher = fetcher.fuzzy(false);
        }

        Ok(Self {
            source,
            archive,
            fetcher,
        })
    }
}
