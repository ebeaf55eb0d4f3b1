//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_acquisition_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use dsfetch_core::AcquisitionConfig;
use dsfetch_core::DatasetAcquirer;
use dsfetch_core::NoopProgress;
use dsfetch_core::Settings;

pub fn execute(
    args: &ExtractArgs,
    settings: &Settings,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let ingestion = &settings.data_ingestion;
    let archive = super::require(
        args.archive.as_ref(),
        ingestion.local_data_file.as_ref(),
        "archive path",
        "ARCHIVE",
        "data_ingestion.local_data_file",
    )?;
    let output_dir = super::require(
        args.output_dir.as_ref(),
        ingestion.unzip_dir.as_ref(),
        "output directory",
        "OUTPUT_DIR",
        "data_ingestion.unzip_dir",
    )?;

    // Extraction never consults the source location.
    let source = ingestion.source_url.clone().unwrap_or_default();
    let acquirer = DatasetAcquirer::new(AcquisitionConfig::new(source, &archive, &output_dir));

    let report = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Extracting");
        add_acquisition_context(acquirer.extract_archive_with_progress(&mut progress))?
    } else {
        add_acquisition_context(acquirer.extract_archive_with_progress(&mut NoopProgress))?
    };

    formatter.format_extraction_result(&output_dir, &report)
}
