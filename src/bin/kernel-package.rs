//! kernel-package - build a Fedora kernel.spec for a local kernel tree
//!
//! Usage:
//!   kernel-package                      Fetch sources and rewrite kernel.spec
//!   kernel-package --archive            Also archive HEAD into the output directory
//!   kernel-package -C ~/src/linux -d out
//!
//! Run it from (or point `-C` at) a kernel git checkout.

use anyhow::{Context, Result};
use clap::Parser;
use kernel_package::{GitRepository, PackageEngine, Settings, engine, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kernel-package")]
#[command(about = "Make RPM from upstream linux kernel easy")]
#[command(version)]
struct Cli {
    /// Enable patches from the sources/ directory (accepted, not implemented yet)
    #[arg(long = "with-patches")]
    with_patches: bool,

    /// Also write a git archive of HEAD into the output directory
    #[arg(long)]
    archive: bool,

    /// Kernel git working tree
    #[arg(short = 'C', long, default_value = ".", env = "KERNEL_PACKAGE_REPO")]
    repo: PathBuf,

    /// Output directory for fetched files, the spec and the archive
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Base URL the Fedora kernel package files are fetched from
    #[arg(long, env = "KERNEL_PACKAGE_BASE_URL")]
    base_url: Option<String>,

    /// Config file to use instead of the user and repository configs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Usage errors print help to stderr and exit with status 2
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("kernel_package=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let repo = GitRepository::open(&cli.repo)
        .with_context(|| format!("cannot open kernel tree at {}", cli.repo.display()))?;

    let mut settings = match &cli.config {
        Some(path) => Settings::load_file(path)?,
        None => Settings::load(repo.root())?,
    };
    if let Some(directory) = cli.directory {
        settings.directory = directory;
    }
    if let Some(url) = &cli.base_url {
        settings.set_base_url(url);
    }

    let mut options = engine::build_options(&repo, &settings)?;
    options.with_patches = cli.with_patches;

    PackageEngine::new(&repo, options)
        .with_archive(cli.archive)
        .execute()
        .context("packaging failed")?;
    Ok(())
}
