//! Settings for a packaging run.
//!
//! Values come from built-in defaults, then the user config
//! (`$XDG_CONFIG_HOME/kernel-package/config.toml`), then the repository
//! config (`<repo>/.kernel-package.toml`). CLI flags are applied by the
//! caller on top of the merged result.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::{PackageError, Result};

/// Where the Fedora kernel package files are served from.
pub const DEFAULT_BASE_URL: &str = "http://pkgs.fedoraproject.org/cgit/kernel.git/plain/";
pub const DEFAULT_NAME: &str = "kernel";
pub const DEFAULT_FORMAT: &str = "tar.gz";
pub const DEFAULT_DIRECTORY: &str = "sources";

/// File name of the per-repository config.
pub const REPO_CONFIG_FILE: &str = ".kernel-package.toml";

/// Auxiliary files fetched alongside the spec, in download order.
pub const DEFAULT_SOURCES: &[&str] = &[
    "config-arm64",
    "config-arm-generic",
    "config-armv7",
    "config-armv7-generic",
    "config-armv7-lpae",
    "config-debug",
    "config-generic",
    "config-i686-PAE",
    "config-nodebug",
    "config-powerpc32-generic",
    "config-powerpc32-smp",
    "config-powerpc64",
    "config-powerpc64p7",
    "config-powerpc-generic",
    "config-s390x",
    "config-x86-32-generic",
    "config-x86_64-generic",
    "config-x86-generic",
    "cpupower.config",
    "cpupower.service",
    "Makefile",
    "Makefile.config",
    "Makefile.release",
    "merge.pl",
    "mod-extra.list",
    "mod-extra.sh",
    "mod-sign.sh",
    "x509.genkey",
];

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Package name; also the spec file stem
    pub name: String,
    /// Remote base URL, always ending in `/`
    pub base_url: String,
    /// Output directory for fetched files and the archive
    pub directory: PathBuf,
    /// `git archive` format
    pub format: String,
    /// Auxiliary files to fetch
    pub sources: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            format: DEFAULT_FORMAT.to_string(),
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    name: Option<String>,
    base_url: Option<String>,
    directory: Option<PathBuf>,
    format: Option<String>,
    sources: Option<Vec<String>>,
}

impl SettingsToml {
    fn merge(&mut self, other: SettingsToml) {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.directory.is_some() {
            self.directory = other.directory;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.sources.is_some() {
            self.sources = other.sources;
        }
    }

    fn apply_to(self, settings: &mut Settings) {
        if let Some(name) = self.name {
            settings.name = name;
        }
        if let Some(base_url) = self.base_url {
            settings.set_base_url(&base_url);
        }
        if let Some(directory) = self.directory {
            settings.directory = directory;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(sources) = self.sources {
            settings.sources = sources;
        }
    }
}

impl Settings {
    /// Load settings for a repository from the user and repository configs.
    ///
    /// Missing config files are skipped.
    pub fn load(repo_root: &Path) -> Result<Self> {
        let mut merged = SettingsToml::default();

        if let Some(user) = user_config_path() {
            if let Some(parsed) = read_optional(&user)? {
                tracing::debug!(path = %user.display(), "loaded user config");
                merged.merge(parsed);
            }
        }

        let repo = repo_root.join(REPO_CONFIG_FILE);
        if let Some(parsed) = read_optional(&repo)? {
            tracing::debug!(path = %repo.display(), "loaded repository config");
            merged.merge(parsed);
        }

        let mut settings = Settings::default();
        merged.apply_to(&mut settings);
        Ok(settings)
    }

    /// Load settings from a single explicit config file, which must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        let parsed = read_toml(path)?;
        let mut settings = Settings::default();
        parsed.apply_to(&mut settings);
        Ok(settings)
    }

    /// Set the base URL, adding the trailing `/` file names are appended to.
    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        };
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kernel-package").join("config.toml"))
}

fn read_optional(path: &Path) -> Result<Option<SettingsToml>> {
    if !path.is_file() {
        return Ok(None);
    }
    read_toml(path).map(Some)
}

fn read_toml(path: &Path) -> Result<SettingsToml> {
    let content = std::fs::read_to_string(path).map_err(|e| PackageError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| PackageError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
