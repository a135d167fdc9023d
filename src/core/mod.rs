//! Core types: settings, options, version metadata, errors and output.

pub mod config;
pub mod error;
pub mod options;
pub mod output;
pub mod version;

pub use config::Settings;
pub use error::{PackageError, Result};
pub use options::{BuildOptions, SourceFileList};
pub use version::KernelVersion;
