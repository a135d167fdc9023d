//! Source archive of the kernel tree.

use std::path::PathBuf;

use crate::core::error::{PackageError, Result};
use crate::core::options::BuildOptions;

use super::acquire::git::GitRepository;
use super::internal::fs_utils;
use super::internal::progress::{self, ProgressGuard};

/// Export the commit in `options` as `<directory>/<archive name>`.
///
/// The output directory is created if needed. Requires `options.prefix`.
pub fn archive(repo: &GitRepository, options: &BuildOptions) -> Result<PathBuf> {
    let prefix = options
        .prefix
        .as_deref()
        .ok_or_else(|| PackageError::Archive("archive prefix is not set".to_string()))?;

    fs_utils::ensure_dir(&options.directory)?;
    let dest = options.archive_path();

    let pb = progress::create_spinner(&format!("archiving {}", options.archive_name()));
    let _guard = ProgressGuard::new(&pb);

    repo.archive(&options.sha, &options.format, prefix, &dest)?;
    tracing::debug!(dest = %dest.display(), prefix, "archive written");
    Ok(dest)
}
