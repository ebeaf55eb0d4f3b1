//! Run command implementation: download, then extract.

use super::FetchTarget;
use crate::cli::RunArgs;
use crate::error::AlreadyReported;
use crate::error::add_acquisition_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use dsfetch_core::AcquisitionConfig;
use dsfetch_core::DatasetAcquirer;
use dsfetch_core::NoopProgress;
use dsfetch_core::Settings;

pub fn execute(
    args: &RunArgs,
    settings: &Settings,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let target = FetchTarget::resolve(&args.fetch, settings)?;
    let output_dir = super::require(
        args.output.as_ref(),
        settings.data_ingestion.unzip_dir.as_ref(),
        "output directory",
        "--output",
        "data_ingestion.unzip_dir",
    )?;
    add_acquisition_context(settings.create_directories())?;

    let abort = args.abort_on_download_failure || settings.download.abort_extraction_on_failure;
    let config = AcquisitionConfig::new(target.source, &target.archive, &output_dir);
    let acquirer =
        DatasetAcquirer::with_fetcher(config, target.fetcher).abort_extraction_on_failure(abort);

    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        acquirer.acquire_with_progress(&mut progress)
    } else {
        acquirer.acquire_with_progress(&mut NoopProgress)
    };

    formatter.format_acquisition_result(&target.archive, &output_dir, &report)?;

    if report.is_success() {
        Ok(())
    } else {
        Err(AlreadyReported.into())
    }
}
