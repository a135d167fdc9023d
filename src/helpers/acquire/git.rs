//! Handle on the kernel's git working tree.
//!
//! Wraps the `git` binary. A `GitRepository` is opened once by the caller
//! and passed by reference to everything that needs the tree.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::core::error::{PackageError, Result};

/// An opened, non-bare git working tree.
#[derive(Debug, Clone)]
pub struct GitRepository {
    git: PathBuf,
    root: PathBuf,
}

impl GitRepository {
    /// Open the working tree containing `path`.
    ///
    /// Fails if git is not installed, `path` is not inside a repository, or
    /// the repository is bare.
    pub fn open(path: &Path) -> Result<Self> {
        let git = which::which("git")
            .map_err(|e| PackageError::Repository(format!("git not found in PATH: {}", e)))?;

        let probe = Self {
            git,
            root: path.to_path_buf(),
        };

        let bare = probe.rev_parse(&["--is-bare-repository"])?;
        if bare == "true" {
            return Err(PackageError::Repository(format!(
                "{} is a bare repository",
                path.display()
            )));
        }

        let root = PathBuf::from(probe.rev_parse(&["--show-toplevel"])?);
        tracing::debug!(root = %root.display(), "opened git repository");
        Ok(Self { root, ..probe })
    }

    /// Top-level directory of the working tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file relative to the working tree root.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Full hash of the checked-out commit.
    pub fn head_sha(&self) -> Result<String> {
        self.rev_parse(&["HEAD"])
    }

    /// Write `git archive` output for `treeish` to `dest`.
    ///
    /// Paths inside the archive are placed under `prefix`.
    pub fn archive(&self, treeish: &str, format: &str, prefix: &str, dest: &Path) -> Result<()> {
        let format_arg = format!("--format={}", format);
        let prefix_arg = format!("--prefix={}", prefix);
        // git runs from the tree root, so a relative dest would land there
        let dest = std::path::absolute(dest).map_err(|e| PackageError::io(dest, e))?;
        let output_arg = format!("--output={}", dest.display());

        let output = self
            .command(&["archive", &format_arg, &prefix_arg, &output_arg, treeish])
            .map_err(|e| PackageError::Archive(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PackageError::Archive(format!(
                "git archive {} failed: {}",
                treeish,
                stderr.trim()
            )));
        }
        Ok(())
    }

    fn rev_parse(&self, args: &[&str]) -> Result<String> {
        let mut full = vec!["rev-parse"];
        full.extend_from_slice(args);

        let output = self
            .command(&full)
            .map_err(|e| PackageError::Repository(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PackageError::Repository(format!(
                "git rev-parse {} in {}: {}",
                args.join(" "),
                self.root.display(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn command(&self, args: &[&str]) -> std::io::Result<Output> {
        tracing::debug!(args = ?args, "git");
        Command::new(&self.git)
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .stdin(Stdio::null())
            .output()
    }
}
