//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::error::convert_acquisition_error;
use anyhow::Result;
use console::Term;
use console::style;
use dsfetch_core::AcquisitionError;
use dsfetch_core::AcquisitionReport;
use dsfetch_core::DownloadOutcome;
use dsfetch_core::ExtractionReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn success_line(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn failure_line(&self, step: &str, err: &AcquisitionError) {
        let converted = convert_acquisition_error(err);
        if self.use_colors {
            let _ = self.err_term.write_line(&format!(
                "{} {step} failed: {converted:#}",
                style("✗").red().bold()
            ));
        } else {
            let _ = self
                .err_term
                .write_line(&format!("{step} failed: {converted:#}"));
        }
    }

    fn download_details(&self, archive: &Path, outcome: &DownloadOutcome) {
        let headline = if outcome.fetched() {
            "Download complete"
        } else {
            "Archive already present, download skipped"
        };
        self.success_line(headline);
        let _ = self
            .term
            .write_line(&format!("  Archive: {}", archive.display()));
        let _ = self
            .term
            .write_line(&format!("  Size: {}", Self::format_size(outcome.size())));
    }

    fn extraction_details(&self, output_dir: &Path, report: &ExtractionReport) {
        self.success_line("Extraction complete");
        let _ = self
            .term
            .write_line(&format!("  Output: {}", output_dir.display()));
        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_download_result(&self, archive: &Path, outcome: &DownloadOutcome) -> Result<()> {
        if !self.quiet {
            self.download_details(archive, outcome);
        }
        Ok(())
    }

    fn format_extraction_result(
        &self,
        output_dir: &Path,
        report: &ExtractionReport,
    ) -> Result<()> {
        if !self.quiet {
            self.extraction_details(output_dir, report);
        }
        Ok(())
    }

    fn format_acquisition_result(
        &self,
        archive: &Path,
        output_dir: &Path,
        report: &AcquisitionReport,
    ) -> Result<()> {
        // Failures are always shown, even in quiet mode
        match &report.download {
            Ok(outcome) if !self.quiet => self.download_details(archive, outcome),
            Ok(_) => {}
            Err(err) => self.failure_line("Download", err),
        }

        match &report.extraction {
            Some(Ok(extraction)) if !self.quiet => self.extraction_details(output_dir, extraction),
            Some(Ok(_)) => {}
            Some(Err(err)) => self.failure_line("Extraction", err),
            None if self.use_colors => {
                let _ = self.err_term.write_line(&format!(
                    "{} Extraction skipped because the download failed",
                    style("⚠").yellow().bold()
                ));
            }
            None => {
                let _ = self
                    .err_term
                    .write_line("WARNING: Extraction skipped because the download failed");
            }
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(512), "512 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(HumanFormatter::format_size(1024), "1.0 KB");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_format_size_megabytes_and_up() {
        assert_eq!(HumanFormatter::format_size(1536 * 1024), "1.5 MB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024 * 1024), "2.0 GB");
    }
}
