//! Packaging engine
//!
//! Runs one packaging pass over a kernel tree: read the version from the
//! tree's Makefile, fetch the auxiliary files and the spec, rewrite the spec,
//! and optionally archive the checked-out commit.

use std::path::PathBuf;

use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::options::{BuildOptions, SourceFileList};
use crate::core::output;
use crate::core::version::KernelVersion;
use crate::helpers::acquire::{FileFetcher, GitRepository};
use crate::helpers::archive;
use crate::recipe::{self, RewriteSummary};

/// Makefile the version block is read from, relative to the tree root.
pub const VERSION_MAKEFILE: &str = "Makefile";

/// Build options for `repo` at its current HEAD.
///
/// `config-local` is only fetched when the output directory doesn't already
/// hold one.
pub fn build_options(repo: &GitRepository, settings: &Settings) -> Result<BuildOptions> {
    let sha = repo.head_sha()?;
    let sources = SourceFileList::for_directory(settings.sources.clone(), &settings.directory);
    Ok(BuildOptions::new(settings, sha, sources))
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct PackageReport {
    pub version: KernelVersion,
    pub fetched: Vec<PathBuf>,
    pub spec: PathBuf,
    pub rewrite: RewriteSummary,
    pub archive: Option<PathBuf>,
    /// Warnings printed during the run
    pub warnings: Vec<String>,
}

/// Printed when `--with-patches` is given.
pub const WITH_PATCHES_WARNING: &str =
    "--with-patches is not implemented; patch directives stay disabled";

/// Packaging engine for one kernel tree.
pub struct PackageEngine<'r> {
    repo: &'r GitRepository,
    options: BuildOptions,
    archive: bool,
}

impl<'r> PackageEngine<'r> {
    pub fn new(repo: &'r GitRepository, options: BuildOptions) -> Self {
        Self {
            repo,
            options,
            archive: false,
        }
    }

    /// Also write the source archive at the end of the run.
    pub fn with_archive(mut self, archive: bool) -> Self {
        self.archive = archive;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run every step in order. The first failure aborts the run; files
    /// already written stay in place.
    pub fn execute(&mut self) -> Result<PackageReport> {
        let version = self.read_version()?;

        let mut warnings = Vec::new();
        if self.options.with_patches {
            output::warning(WITH_PATCHES_WARNING);
            warnings.push(WITH_PATCHES_WARNING.to_string());
        }

        let fetcher = FileFetcher::from_options(&self.options);
        output::action(&format!(
            "Fetching {} files into {}",
            self.options.sources.len() + 1,
            fetcher.directory().display()
        ));
        let mut fetched = fetcher.fetch_all(self.options.sources.names())?;
        let spec = fetcher.fetch_recipe(&self.options.name)?;
        fetched.push(spec.clone());

        output::action(&format!("Rewriting {}", self.options.spec_name()));
        let rewrite = recipe::rewrite_spec(&self.options)?;
        output::detail(&format!(
            "{} lines kept, {} values set, {} patches disabled, {} changelog lines dropped",
            rewrite.remaining, rewrite.substituted, rewrite.patches_disabled, rewrite.changelog
        ));

        let archive = if self.archive {
            output::action(&format!("Archiving {}", self.options.sha));
            let path = archive::archive(self.repo, &self.options)?;
            output::detail(&format!("wrote {}", path.display()));
            Some(path)
        } else {
            None
        };

        output::success(&format!(
            "{} {} ready in {}",
            self.options.name,
            version.display_version(),
            self.options.directory.display()
        ));

        Ok(PackageReport {
            version,
            fetched,
            spec,
            rewrite,
            archive,
            warnings,
        })
    }

    /// Read the tree's version into the options and set the archive prefix.
    fn read_version(&mut self) -> Result<KernelVersion> {
        let makefile = self.repo.path(VERSION_MAKEFILE);
        let version = KernelVersion::from_makefile(&makefile)?;
        tracing::debug!(?version, "read kernel version");

        output::field("Version", &version.display_version());
        output::field("Codename", version.name.as_deref().unwrap_or("(none)"));

        self.options.prefix = Some(version.archive_prefix());
        self.options.version = version.clone();
        Ok(version)
    }
}
