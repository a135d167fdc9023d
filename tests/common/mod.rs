//! Shared helpers for integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use std::path::Path;
use std::process::{Command, Stdio};

/// Whether a `git` binary is available; git-backed tests skip without one.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run git in `dir` with a throwaway identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a committed kernel-like tree with the given top-level Makefile.
pub fn init_kernel_tree(dir: &Path, makefile: &str) {
    std::fs::write(dir.join("Makefile"), makefile).unwrap();
    std::fs::create_dir_all(dir.join("kernel")).unwrap();
    std::fs::write(dir.join("kernel/fork.c"), "int nr_threads;\n").unwrap();
    git(dir, &["init", "-q"]);
    git(dir, &["add", "Makefile", "kernel/fork.c"]);
    git(dir, &["commit", "-q", "-m", "Linux 5.10-rc3"]);
}
