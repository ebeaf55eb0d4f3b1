//! In-memory zip archives and fetchers for unit tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::cell::RefCell;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::AcquisitionError;
use crate::Fetcher;
use crate::Result;

/// Builder for zip test archives.
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds an uncompressed file.
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a deflate-compressed file.
    pub fn add_deflated_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

/// Archive holding `a.txt` and `sub/b.txt`.
pub fn sample_zip() -> Vec<u8> {
    ZipTestBuilder::new()
        .add_file("a.txt", b"alpha")
        .add_directory("sub/")
        .add_file("sub/b.txt", b"bravo")
        .build()
}

/// Fetcher that records its calls and writes fixed bytes, or fails.
pub struct RecordingFetcher {
    payload: Option<Vec<u8>>,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl RecordingFetcher {
    /// Writes `payload` to the destination on every call.
    pub fn writing(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Fails every call like a tool exiting with status 1.
    pub fn failing() -> Self {
        Self {
            payload: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl Fetcher for RecordingFetcher {
    fn fetch(&self, source: &str, destination: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((source.to_string(), destination.to_path_buf()));
        match &self.payload {
            Some(bytes) => {
                std::fs::write(destination, bytes)?;
                Ok(())
            }
            None => Err(AcquisitionError::DownloadFailed {
                tool: self.name().to_string(),
                code: Some(1),
            }),
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}
