//! Download command implementation.

use super::FetchTarget;
use crate::cli::DownloadArgs;
use crate::error::add_acquisition_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use dsfetch_core::AcquisitionConfig;
use dsfetch_core::DatasetAcquirer;
use dsfetch_core::Settings;

pub fn execute(
    args: &DownloadArgs,
    settings: &Settings,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let target = FetchTarget::resolve(&args.fetch, settings)?;
    add_acquisition_context(settings.create_directories())?;

    // The extraction directory is not consulted by the download step.
    let unzip_dir = settings.data_ingestion.unzip_dir.clone().unwrap_or_default();
    let config = AcquisitionConfig::new(target.source, &target.archive, unzip_dir);
    let acquirer = DatasetAcquirer::with_fetcher(config, target.fetcher);

    let outcome = add_acquisition_context(acquirer.ensure_downloaded())?;
    formatter.format_download_result(&target.archive, &outcome)
}
