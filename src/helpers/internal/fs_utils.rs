//! Common filesystem utilities

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::error::{PackageError, Result};

/// Create a directory and its ancestors; an existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| PackageError::io(dir, e))
}

/// Sibling path a download is staged in before being renamed into place.
///
/// ```ignore
/// assert_eq!(partial_path(Path::new("sources/kernel.spec")), Path::new("sources/kernel.spec.part"));
/// ```
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("download"));
    name.push(".part");
    dest.with_file_name(name)
}
