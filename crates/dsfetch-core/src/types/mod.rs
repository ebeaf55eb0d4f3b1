//! Validated path wrappers used during extraction.
//!
//! Both types can only be obtained through their validating constructors,
//! so holding one means the check already happened.

pub mod dest_dir;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use safe_path::SafePath;
