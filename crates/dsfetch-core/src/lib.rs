//! Dataset acquisition: fetch a remote archive, then unpack it locally.
//!
//! `dsfetch-core` is the preparatory step of a data pipeline. Given an
//! [`AcquisitionConfig`] it makes sure the dataset archive exists on disk
//! (downloading it through a [`Fetcher`] when absent) and expands the zip
//! archive into a destination directory.
//!
//! Every step logs what happened through `tracing` and also returns a typed
//! [`Result`], so callers can react to failures instead of scraping logs.
//!
//! # Examples
//!
//! ```no_run
//! use dsfetch_core::AcquisitionConfig;
//! use dsfetch_core::DatasetAcquirer;
//!
//! let config = AcquisitionConfig::new(
//!     "https://drive.google.com/file/d/abc/view",
//!     "artifacts/data_ingestion/data.zip",
//!     "artifacts/data_ingestion",
//! );
//! let acquirer = DatasetAcquirer::new(config);
//! let report = acquirer.acquire();
//! if !report.is_success() {
//!     eprintln!("dataset acquisition failed");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod acquirer;
pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod report;
pub mod settings;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use acquirer::DatasetAcquirer;
pub use api::extract_zip;
pub use api::extract_zip_with_progress;
pub use config::AcquisitionConfig;
pub use config::DownloadSettings;
pub use error::AcquisitionError;
pub use error::FailureKind;
pub use error::Result;
pub use fetch::CommandFetcher;
pub use fetch::Fetcher;
pub use report::AcquisitionReport;
pub use report::DownloadOutcome;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use settings::Settings;
pub use types::DestDir;
pub use types::SafePath;
