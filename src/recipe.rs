//! Rewriting the downloaded `kernel.spec` for a local kernel tree.
//!
//! The spec is treated as plain lines. Comment and blank lines are dropped
//! first, then each remaining line is checked against a fixed list of
//! directives, first match wins:
//!
//! | directive                         | result                                  |
//! |-----------------------------------|-----------------------------------------|
//! | `%changelog`                      | this line and everything after removed  |
//! | `%global released_kernel [01]`    | `1` if released, else `0`               |
//! | `%define base_sublevel N`         | `PATCHLEVEL`                            |
//! | `%define stable_update N`         | `SUBLEVEL`                              |
//! | `%define rcrev N`                 | digits of `EXTRAVERSION`, `0` if released |
//! | `%define gitrev N`                | `0`                                     |
//! | `%define debugbuildsenabled [01]` | `1`                                     |
//! | `%define rawhide_skip_docs [01]`  | `0`                                     |
//! | `Source0: ...`                    | `Source0: <archive name>`               |
//! | `PatchN:`, `ApplyPatch`, `ApplyOptionalPatch` | commented out with `#`      |
//!
//! Anything else passes through untouched, line terminators included.

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::{PackageError, Result};
use crate::core::options::BuildOptions;

fn regex(pattern: &str) -> Regex {
    // Patterns are literals below; a failure here is a typo in this file.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid spec pattern {:?}: {}", pattern, e))
}

static COMMENT: LazyLock<Regex> = LazyLock::new(|| regex(r"^\s*#"));
static CHANGELOG: LazyLock<Regex> = LazyLock::new(|| regex(r"^%changelog"));
static RELEASED_KERNEL: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^%global released_kernel ([01])"));
static BASE_SUBLEVEL: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^%define base_sublevel ([0-9]+)"));
static STABLE_UPDATE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^%define stable_update ([0-9]+)"));
static RCREV: LazyLock<Regex> = LazyLock::new(|| regex(r"^%define rcrev ([0-9]+)"));
static GITREV: LazyLock<Regex> = LazyLock::new(|| regex(r"^%define gitrev ([0-9]+)"));
static DEBUG_BUILDS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^%define debugbuildsenabled ([01])"));
static SKIP_DOCS: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^%define rawhide_skip_docs ([01])"));
static SOURCE0: LazyLock<Regex> = LazyLock::new(|| regex(r"^Source0: "));
static PATCH: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^\s*(Patch[0-9]+:|ApplyPatch |ApplyOptionalPatch )"));

/// What a rewrite did, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Comment and blank lines dropped up front
    pub filtered: usize,
    /// Lines removed with the changelog
    pub changelog: usize,
    /// Directives whose value was replaced
    pub substituted: usize,
    /// Patch directives commented out
    pub patches_disabled: usize,
    /// Lines in the result
    pub remaining: usize,
}

/// Drop comment lines and lines that are only a newline, keeping order.
pub fn filter_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|line| *line != "\n" && !COMMENT.is_match(line))
        .map(str::to_string)
        .collect()
}

/// Split text into lines that keep their terminators.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// Rewrites spec text for one set of build options.
pub struct SpecRewriter<'a> {
    options: &'a BuildOptions,
}

impl<'a> SpecRewriter<'a> {
    pub fn new(options: &'a BuildOptions) -> Self {
        Self { options }
    }

    /// Rewrite the spec file at `path` in place.
    pub fn rewrite_file(&self, path: &Path) -> Result<RewriteSummary> {
        let bytes = std::fs::read(path).map_err(|e| PackageError::io(path, e))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| PackageError::malformed(path, format!("not valid UTF-8: {}", e)))?;
        let (lines, summary) = self
            .rewrite_lines(&split_lines(&text))
            .map_err(|reason| PackageError::malformed(path, reason))?;
        std::fs::write(path, lines.concat()).map_err(|e| PackageError::io(path, e))?;
        Ok(summary)
    }

    /// Rewrite a list of lines, each carrying its own terminator.
    ///
    /// Fails only when a directive needs a version field that is unset.
    pub fn rewrite_lines<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> std::result::Result<(Vec<String>, RewriteSummary), String> {
        let total = lines.len();
        let mut lines = filter_lines(lines);
        let mut summary = RewriteSummary {
            filtered: total - lines.len(),
            ..Default::default()
        };

        if let Some(at) = lines.iter().position(|line| CHANGELOG.is_match(line)) {
            summary.changelog = lines.len() - at;
            lines.truncate(at);
        }

        for line in lines.iter_mut() {
            if let Some((digits, value)) = self.directive_value(line)? {
                tracing::debug!(line = line.trim_end(), %value, "substituting");
                *line = format!("{}{}{}", &line[..digits.start], value, &line[digits.end..]);
                summary.substituted += 1;
            } else if SOURCE0.is_match(line) {
                *line = replace_source0(line, &self.options.archive_name());
                summary.substituted += 1;
            } else if PATCH.is_match(line) {
                line.insert(0, '#');
                summary.patches_disabled += 1;
            }
        }

        summary.remaining = lines.len();
        Ok((lines, summary))
    }

    /// Byte range of a directive's value and what it becomes, if `line` is
    /// one of the value directives.
    fn directive_value(
        &self,
        line: &str,
    ) -> std::result::Result<Option<(Range<usize>, String)>, String> {
        let version = &self.options.version;
        let released = || -> ValueResult {
            Ok(if self.options.released() { "1" } else { "0" }.to_string())
        };
        let base_sublevel = || required(&version.patchlevel, "PATCHLEVEL");
        let stable_update = || required(&version.sublevel, "SUBLEVEL");
        let rcrev = || -> ValueResult {
            version
                .rc_revision()
                .ok_or_else(|| "EXTRAVERSION has no release-candidate number".to_string())
        };
        let zero = || -> ValueResult { Ok("0".to_string()) };
        let one = || -> ValueResult { Ok("1".to_string()) };

        let rules: [(&Regex, &dyn Fn() -> ValueResult); 7] = [
            (&*RELEASED_KERNEL, &released),
            (&*BASE_SUBLEVEL, &base_sublevel),
            (&*STABLE_UPDATE, &stable_update),
            (&*RCREV, &rcrev),
            (&*GITREV, &zero),
            (&*DEBUG_BUILDS, &one),
            (&*SKIP_DOCS, &zero),
        ];

        for (pattern, value) in rules {
            if let Some(caps) = pattern.captures(line) {
                let digits = caps
                    .get(1)
                    .ok_or_else(|| format!("directive without a value: {:?}", line.trim_end()))?;
                return Ok(Some((digits.range(), value()?)));
            }
        }
        Ok(None)
    }
}

type ValueResult = std::result::Result<String, String>;

fn required(field: &Option<String>, name: &str) -> ValueResult {
    field.clone().ok_or_else(|| format!("{} is not set", name))
}

/// `Source0: <anything>` becomes `Source0: <archive>`, keeping the newline.
fn replace_source0(line: &str, archive: &str) -> String {
    let (body, newline) = match line.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (line, ""),
    };
    let head = body.split_once(' ').map_or(body, |(head, _)| head);
    format!("{} {}{}", head, archive, newline)
}

/// Rewrite `<directory>/<name>.spec` for `options`.
pub fn rewrite_spec(options: &BuildOptions) -> Result<RewriteSummary> {
    SpecRewriter::new(options).rewrite_file(&options.spec_path())
}
