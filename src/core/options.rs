//! Per-run build options.

use std::path::{Path, PathBuf};

use super::config::Settings;
use super::version::KernelVersion;

/// Name of the optional local kernel config fragment.
pub const CONFIG_LOCAL: &str = "config-local";

/// Ordered list of auxiliary files to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileList {
    names: Vec<String>,
}

impl SourceFileList {
    /// Build the list from the configured names.
    ///
    /// `config-local` is appended when `fetch_config_local` is set; callers
    /// set it when no local `config-local` exists yet.
    pub fn new(names: Vec<String>, fetch_config_local: bool) -> Self {
        let mut names = names;
        if fetch_config_local && !names.iter().any(|n| n == CONFIG_LOCAL) {
            names.push(CONFIG_LOCAL.to_string());
        }
        Self { names }
    }

    /// Build the list, fetching `config-local` only if `directory` lacks one.
    pub fn for_directory(names: Vec<String>, directory: &Path) -> Self {
        Self::new(names, !directory.join(CONFIG_LOCAL).exists())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything one packaging run needs to know.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Package name, also the spec file stem
    pub name: String,
    /// Commit the archive and its file name refer to
    pub sha: String,
    /// Path prefix inside the archive, ends with `/`
    pub prefix: Option<String>,
    /// `git archive` format
    pub format: String,
    /// Output directory
    pub directory: PathBuf,
    /// Remote base URL for fetched files
    pub base_url: String,
    /// Version read from the kernel tree
    pub version: KernelVersion,
    /// Auxiliary files to fetch
    pub sources: SourceFileList,
    /// Keep patch directives enabled. Accepted but not acted on yet.
    pub with_patches: bool,
}

impl BuildOptions {
    pub fn new(settings: &Settings, sha: impl Into<String>, sources: SourceFileList) -> Self {
        Self {
            name: settings.name.clone(),
            sha: sha.into(),
            prefix: None,
            format: settings.format.clone(),
            directory: settings.directory.clone(),
            base_url: settings.base_url.clone(),
            version: KernelVersion::default(),
            sources,
            with_patches: false,
        }
    }

    /// Archive file name, `name-sha.format`.
    pub fn archive_name(&self) -> String {
        format!("{}-{}.{}", self.name, self.sha, self.format)
    }

    /// Where the archive is written.
    pub fn archive_path(&self) -> PathBuf {
        self.directory.join(self.archive_name())
    }

    /// Spec file name, `name.spec`.
    pub fn spec_name(&self) -> String {
        format!("{}.spec", self.name)
    }

    /// Where the fetched spec lives.
    pub fn spec_path(&self) -> PathBuf {
        self.directory.join(self.spec_name())
    }

    pub fn released(&self) -> bool {
        self.version.released
    }
}
