//! Package an upstream Linux kernel tree as a Fedora kernel build
//!
//! Given a kernel git checkout, the packager:
//!
//! 1. reads `VERSION`, `PATCHLEVEL`, `SUBLEVEL`, `EXTRAVERSION` and `NAME`
//!    from the top of the tree's `Makefile`,
//! 2. fetches the Fedora kernel config fragments, helper scripts and
//!    `kernel.spec` into an output directory,
//! 3. rewrites `kernel.spec` so it builds this tree (version macros,
//!    `Source0`, release flags) with Fedora's patches disabled and the
//!    changelog dropped,
//! 4. optionally writes a `git archive` of HEAD next to it.
//!
//! # Example
//!
//! ```no_run
//! use kernel_package::{GitRepository, PackageEngine, Settings, engine};
//! use std::path::Path;
//!
//! # fn main() -> kernel_package::Result<()> {
//! let repo = GitRepository::open(Path::new("."))?;
//! let settings = Settings::load(repo.root())?;
//! let options = engine::build_options(&repo, &settings)?;
//! let report = PackageEngine::new(&repo, options).with_archive(true).execute()?;
//! println!("{}", report.spec.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! `Settings` are read from `$XDG_CONFIG_HOME/kernel-package/config.toml`
//! and then `<repo>/.kernel-package.toml`:
//!
//! ```toml
//! name = "kernel"
//! base_url = "http://pkgs.fedoraproject.org/cgit/kernel.git/plain/"
//! directory = "sources"
//! format = "tar.gz"
//! sources = ["config-generic", "config-x86_64-generic", "Makefile"]
//! ```

pub mod core;
pub mod engine;
pub mod helpers;
pub mod recipe;

pub use crate::core::{
    BuildOptions, KernelVersion, PackageError, Result, Settings, SourceFileList, output,
};
pub use engine::{PackageEngine, PackageReport};
pub use helpers::acquire::{FileFetcher, GitRepository};
pub use recipe::{RewriteSummary, SpecRewriter};
