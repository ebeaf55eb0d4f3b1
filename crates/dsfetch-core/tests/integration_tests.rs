//! Integration tests for dsfetch-core.
//!
//! These tests drive the public API end to end with real filesystem
//! operations and an in-process fetcher standing in for the download tool.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use dsfetch_core::AcquisitionConfig;
use dsfetch_core::AcquisitionError;
use dsfetch_core::DatasetAcquirer;
use dsfetch_core::FailureKind;
use dsfetch_core::Fetcher;
use dsfetch_core::Result;
use dsfetch_core::Settings;
use std::cell::Cell;
use std::fs;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// Copies a prepared archive into place, counting invocations.
struct CopyFetcher {
    archive: Vec<u8>,
    invocations: Cell<usize>,
}

impl CopyFetcher {
    fn new(archive: Vec<u8>) -> Self {
        Self {
            archive,
            invocations: Cell::new(0),
        }
    }
}

impl Fetcher for CopyFetcher {
    fn fetch(&self, _source: &str, destination: &Path) -> Result<()> {
        self.invocations.set(self.invocations.get() + 1);
        fs::write(destination, &self.archive)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "copy"
    }
}

struct Layout {
    _temp: TempDir,
    archive: PathBuf,
    output: PathBuf,
}

fn layout() -> Layout {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("artifacts").join("data.zip");
    let output = temp.path().join("artifacts").join("data");
    Layout {
        _temp: temp,
        archive,
        output,
    }
}

impl Layout {
    fn config(&self) -> AcquisitionConfig {
        AcquisitionConfig::new("https://example.com/data.zip", &self.archive, &self.output)
    }
}

#[test]
fn test_download_then_extract_preserves_structure() {
    let paths = layout();
    let fetcher = CopyFetcher::new(build_zip(&[
        ("a.txt", b"first file"),
        ("sub/", b""),
        ("sub/b.txt", b"second file"),
    ]));
    let acquirer = DatasetAcquirer::with_fetcher(paths.config(), &fetcher);

    let report = acquirer.acquire();

    assert!(report.is_success(), "{report:?}");
    assert_eq!(fetcher.invocations.get(), 1);
    assert_eq!(fs::read(paths.output.join("a.txt")).unwrap(), b"first file");
    assert_eq!(
        fs::read(paths.output.join("sub").join("b.txt")).unwrap(),
        b"second file"
    );
}

#[test]
fn test_existing_archive_is_reused() {
    let paths = layout();
    fs::create_dir_all(paths.archive.parent().unwrap()).unwrap();
    fs::write(&paths.archive, build_zip(&[("cached.txt", b"from disk")])).unwrap();

    let fetcher = CopyFetcher::new(build_zip(&[("fresh.txt", b"from network")]));
    let acquirer = DatasetAcquirer::with_fetcher(paths.config(), &fetcher);
    let report = acquirer.acquire();

    assert!(report.is_success());
    assert_eq!(fetcher.invocations.get(), 0);
    assert!(paths.output.join("cached.txt").exists());
    assert!(!paths.output.join("fresh.txt").exists());
}

#[test]
fn test_extract_twice_matches_extract_once() {
    let paths = layout();
    let fetcher = CopyFetcher::new(build_zip(&[("a.txt", b"1"), ("sub/b.txt", b"22")]));
    let acquirer = DatasetAcquirer::with_fetcher(paths.config(), &fetcher);
    acquirer.ensure_downloaded().unwrap();

    let first = acquirer.extract_archive().unwrap();
    let second = acquirer.extract_archive().unwrap();

    assert_eq!(first.files_extracted, second.files_extracted);
    assert_eq!(first.bytes_written, second.bytes_written);
    let mut names: Vec<_> = fs::read_dir(&paths.output)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    names.sort();
    assert_eq!(names, ["a.txt", "sub"]);
    assert_eq!(fs::read(paths.output.join("sub/b.txt")).unwrap(), b"22");
}

#[test]
fn test_missing_archive_does_not_create_output() {
    let paths = layout();
    let acquirer = DatasetAcquirer::with_fetcher(paths.config(), CopyFetcher::new(Vec::new()));

    let err = acquirer.extract_archive().unwrap_err();

    assert!(matches!(err, AcquisitionError::MissingArchive { .. }));
    assert!(!paths.output.exists());
}

#[test]
fn test_garbage_download_is_invalid_archive() {
    let paths = layout();
    // A share link that resolves to an HTML interstitial instead of the file.
    let fetcher = CopyFetcher::new(b"<!DOCTYPE html><title>Virus scan warning</title>".to_vec());
    let acquirer = DatasetAcquirer::with_fetcher(paths.config(), &fetcher);

    let report = acquirer.acquire();

    assert!(report.download.is_ok());
    let err = report.extraction.unwrap().unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidArchive);
    assert!(!paths.output.exists());
}

#[test]
fn test_existing_output_untouched_on_missing_archive() {
    let paths = layout();
    fs::create_dir_all(&paths.output).unwrap();
    fs::write(paths.output.join("keep.txt"), "previous run").unwrap();

    let acquirer = DatasetAcquirer::with_fetcher(paths.config(), CopyFetcher::new(Vec::new()));
    assert!(acquirer.extract_archive().is_err());

    assert_eq!(
        fs::read_to_string(paths.output.join("keep.txt")).unwrap(),
        "previous run"
    );
}

#[test]
fn test_settings_file_drives_acquirer() {
    let paths = layout();
    let settings_path = paths.archive.with_file_name("config.toml");
    let root = paths.archive.parent().unwrap().to_path_buf();
    fs::create_dir_all(&root).unwrap();
    fs::write(
        &settings_path,
        format!(
            "[data_ingestion]\n\
             root_dir = {root:?}\n\
             source_url = \"https://example.com/data.zip\"\n\
             local_data_file = {archive:?}\n\
             unzip_dir = {output:?}\n\
             [download]\n\
             program = \"dsfetch-test-missing-tool\"\n",
            root = root.to_string_lossy(),
            archive = paths.archive.to_string_lossy(),
            output = paths.output.to_string_lossy(),
        ),
    )
    .unwrap();

    let settings = Settings::load(&settings_path).unwrap();
    settings.create_directories().unwrap();
    let acquirer = DatasetAcquirer::from_settings(&settings).unwrap();
    let report = acquirer.acquire();

    let download_err = report.download.as_ref().unwrap_err();
    assert!(matches!(
        download_err,
        AcquisitionError::ToolUnavailable { tool, .. } if tool == "dsfetch-test-missing-tool"
    ));
    assert!(matches!(
        report.extraction,
        Some(Err(AcquisitionError::MissingArchive { .. }))
    ));
}
