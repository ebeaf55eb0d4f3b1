//! Archive extraction.
//!
//! Only the zip format is supported. Entry names are validated for the whole
//! archive before the destination directory is touched.

pub mod zip;

pub use self::zip::ZipExtractor;
