//! Fetch named files from the remote package source.
//!
//! Every file is requested as `<base_url><name>` and stored as
//! `<directory>/<name>`, replacing whatever was there. The body is staged in
//! a `.part` sibling and renamed into place once complete.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::core::error::{PackageError, Result};
use crate::core::options::BuildOptions;
use crate::core::output;

use super::super::internal::fs_utils;
use super::super::internal::progress::{self, ProgressGuard, upgrade_to_bytes};

/// Downloads files by name from a fixed base URL into one directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base_url: String,
    directory: PathBuf,
}

impl FileFetcher {
    pub fn new(base_url: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            directory: directory.into(),
        }
    }

    pub fn from_options(options: &BuildOptions) -> Self {
        Self::new(options.base_url.clone(), options.directory.clone())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Remote URL for a file name.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}{}", self.base_url, name)
    }

    /// Download one file, returning its local path.
    pub fn fetch(&self, name: &str) -> Result<PathBuf> {
        fs_utils::ensure_dir(&self.directory)?;

        let url = self.url_for(name);
        let dest = self.directory.join(name);
        let partial = fs_utils::partial_path(&dest);
        tracing::debug!(%url, dest = %dest.display(), "fetching");

        let total_bytes = match download_with_progress(&url, &partial, name) {
            Ok(n) => n,
            Err(e) => {
                let _ = std::fs::remove_file(&partial);
                return Err(e);
            }
        };
        std::fs::rename(&partial, &dest).map_err(|e| PackageError::io(&dest, e))?;

        tracing::debug!(name, total_bytes, "fetched");
        Ok(dest)
    }

    /// Download the `<name>.spec` recipe.
    pub fn fetch_recipe(&self, name: &str) -> Result<PathBuf> {
        self.fetch(&format!("{}.spec", name))
    }

    /// Download every name in order, stopping at the first failure.
    pub fn fetch_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<PathBuf>> {
        let total = names.len();
        let mut fetched = Vec::with_capacity(total);
        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            output::action_numbered(i + 1, total, name);
            fetched.push(self.fetch(name)?);
        }
        Ok(fetched)
    }
}

fn download_with_progress(url: &str, dest: &Path, name: &str) -> Result<u64> {
    let pb = progress::create_spinner(&format!("downloading {}", name));
    let _guard = ProgressGuard::new(&pb);

    let response = ureq::get(url).call().map_err(|e| PackageError::Download {
        url: url.to_string(),
        reason: describe_ureq_error(e),
    })?;

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        upgrade_to_bytes(&pb, len);
    }

    let mut file = File::create(dest).map_err(|e| PackageError::io(dest, e))?;
    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| PackageError::Download {
            url: url.to_string(),
            reason: format!("read error: {}", e),
        })?;
        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .map_err(|e| PackageError::io(dest, e))?;
        total_bytes += bytes_read as u64;
        pb.set_position(total_bytes);
    }

    file.flush().map_err(|e| PackageError::io(dest, e))?;
    Ok(total_bytes)
}

fn describe_ureq_error(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, response) => {
            format!("HTTP {} {}", code, response.status_text())
        }
        ureq::Error::Transport(transport) => transport.to_string(),
    }
}
