//! Rewriting a kernel.spec on disk.

mod common;

use common::*;
use kernel_package::recipe::{self, SpecRewriter, filter_lines, split_lines};
use kernel_package::{BuildOptions, KernelVersion, PackageError, Settings, SourceFileList};
use tempfile::TempDir;

fn options_in(dir: &TempDir, makefile: &str) -> BuildOptions {
    let mut settings = Settings::default();
    settings.directory = dir.path().join("sources");

    let mut options = BuildOptions::new(&settings, "abc123", SourceFileList::new(vec![], false));
    let lines: Vec<&str> = makefile
        .lines()
        .skip_while(|l| l.starts_with('#'))
        .take(5)
        .collect();
    options.version = KernelVersion::from_lines(&lines).unwrap();
    options
}

fn write_spec(options: &BuildOptions, content: &str) {
    std::fs::create_dir_all(&options.directory).unwrap();
    std::fs::write(options.spec_path(), content).unwrap();
}

#[test]
fn test_rc_spec_rewritten_in_place() {
    let dir = TempDir::new().unwrap();
    let options = options_in(&dir, RC_MAKEFILE);
    write_spec(&options, KERNEL_SPEC);

    let summary = recipe::rewrite_spec(&options).unwrap();

    let rewritten = std::fs::read_to_string(options.spec_path()).unwrap();
    assert_eq!(rewritten, expected_rc_spec("abc123"));
    assert_eq!(summary.patches_disabled, 4);
    assert_eq!(summary.changelog, 4);
    assert_eq!(summary.remaining, rewritten.lines().count());
}

#[test]
fn test_released_spec() {
    let dir = TempDir::new().unwrap();
    let options = options_in(&dir, RELEASED_MAKEFILE);
    write_spec(&options, KERNEL_SPEC);

    recipe::rewrite_spec(&options).unwrap();

    let rewritten = std::fs::read_to_string(options.spec_path()).unwrap();
    assert!(rewritten.contains("%global released_kernel 1\n"));
    assert!(rewritten.contains("%define base_sublevel 12\n"));
    assert!(rewritten.contains("%define stable_update 6\n"));
    assert!(rewritten.contains("%define rcrev 0\n"));
    assert!(!rewritten.contains("%changelog"));
}

#[test]
fn test_changelog_output_length() {
    let dir = TempDir::new().unwrap();
    let options = options_in(&dir, RC_MAKEFILE);
    let rewriter = SpecRewriter::new(&options);

    let input = split_lines(KERNEL_SPEC);
    let filtered = filter_lines(&input);
    let k = filtered
        .iter()
        .position(|l| l.starts_with("%changelog"))
        .unwrap();

    let (lines, _) = rewriter.rewrite_lines(&input).unwrap();
    assert_eq!(lines.len(), k);
}

#[test]
fn test_filter_keeps_order() {
    let input = split_lines(KERNEL_SPEC);
    let filtered = filter_lines(&input);

    let mut rest = input.iter();
    for line in &filtered {
        assert!(rest.any(|l| l == line), "{:?} out of order", line);
        assert!(!line.trim_start().starts_with('#'));
        assert_ne!(line, "\n");
    }
}

#[test]
fn test_rewriting_twice_only_drops_disabled_patches() {
    let dir = TempDir::new().unwrap();
    let options = options_in(&dir, RC_MAKEFILE);
    write_spec(&options, KERNEL_SPEC);

    recipe::rewrite_spec(&options).unwrap();
    let once = std::fs::read_to_string(options.spec_path()).unwrap();
    recipe::rewrite_spec(&options).unwrap();
    let twice = std::fs::read_to_string(options.spec_path()).unwrap();

    let expected: String = split_lines(&once)
        .into_iter()
        .filter(|l| !l.starts_with('#'))
        .collect();
    assert_eq!(twice, expected);
}

#[test]
fn test_missing_spec_is_io_error() {
    let dir = TempDir::new().unwrap();
    let options = options_in(&dir, RC_MAKEFILE);
    let err = recipe::rewrite_spec(&options).unwrap_err();
    assert!(matches!(err, PackageError::Io { .. }));
}

#[test]
fn test_unset_version_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let mut options = options_in(&dir, RC_MAKEFILE);
    options.version = KernelVersion::default();
    write_spec(&options, KERNEL_SPEC);

    let err = recipe::rewrite_spec(&options).unwrap_err();
    assert!(matches!(err, PackageError::MalformedInput { .. }));
    assert_eq!(std::fs::read_to_string(options.spec_path()).unwrap(), KERNEL_SPEC);
}
