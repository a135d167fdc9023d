//! Kernel version metadata.
//!
//! The top of a kernel `Makefile` carries the version as five assignments:
//!
//! ```text
//! VERSION = 5
//! PATCHLEVEL = 10
//! SUBLEVEL = 0
//! EXTRAVERSION = -rc3
//! NAME = Kleptomaniac Octopus
//! ```
//!
//! Only line order and the `= ` separator matter; key names are ignored.
//! A final release leaves `EXTRAVERSION =` without a value.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::{PackageError, Result};

/// Number of leading assignments that make up the version block.
pub const VERSION_LINES: usize = 5;

/// Index of `EXTRAVERSION` within the version block.
const EXTRAVERSION_LINE: usize = 3;

/// Version fields of a kernel tree, in Makefile order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelVersion {
    /// Major version (`VERSION`)
    pub version: Option<String>,
    /// Base sublevel (`PATCHLEVEL`)
    pub patchlevel: Option<String>,
    /// Stable update (`SUBLEVEL`)
    pub sublevel: Option<String>,
    /// Release candidate or git suffix (`EXTRAVERSION`); `None` once released
    pub extraversion: Option<String>,
    /// Codename (`NAME`)
    pub name: Option<String>,
    /// True for a final, tagged release
    pub released: bool,
}

impl KernelVersion {
    /// Read the version block from the first lines of a kernel Makefile.
    pub fn from_makefile(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PackageError::io(path, e))?;
        let reader = BufReader::new(file);

        let mut lines = Vec::with_capacity(VERSION_LINES);
        for line in reader.lines() {
            let line = line.map_err(|e| PackageError::io(path, e))?;
            // Newer trees open with an SPDX comment before the version block
            if lines.is_empty() && line.trim_start().starts_with('#') {
                continue;
            }
            lines.push(line);
            if lines.len() == VERSION_LINES {
                break;
            }
        }

        Self::from_lines(&lines).map_err(|reason| PackageError::malformed(path, reason))
    }

    /// Build a version from the already-split version block.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> std::result::Result<Self, String> {
        if lines.len() < VERSION_LINES {
            return Err(format!(
                "expected {} version lines, found {}",
                VERSION_LINES,
                lines.len()
            ));
        }

        let values = lines
            .iter()
            .take(VERSION_LINES)
            .enumerate()
            .map(|(i, line)| {
                let line = line.as_ref();
                match assignment_value(line) {
                    Some(value) => Ok(value.to_string()),
                    // `EXTRAVERSION =` with no value is how a release is spelled
                    None if i == EXTRAVERSION_LINE && line.contains('=') => Ok(line.to_string()),
                    None => Err(format!("line {} is not an assignment: {:?}", i + 1, line)),
                }
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut values = values.into_iter();

        let version = values.next();
        let patchlevel = values.next();
        let sublevel = values.next();
        let mut extraversion = values.next();
        let name = values.next();

        // An empty `EXTRAVERSION =` has no `= <value>` part, so the raw line
        // comes through with its `=` still in it.
        let released = extraversion.as_deref().is_some_and(|s| s.contains('='));
        if released {
            extraversion = None;
        }

        Ok(Self {
            version,
            patchlevel,
            sublevel,
            extraversion,
            name,
            released,
        })
    }

    /// Full version string, e.g. `5.10.0` or `5.10.0-rc3`.
    pub fn display_version(&self) -> String {
        let base = format!(
            "{}.{}.{}",
            self.version.as_deref().unwrap_or_default(),
            self.patchlevel.as_deref().unwrap_or_default(),
            self.sublevel.as_deref().unwrap_or_default()
        );
        match (&self.extraversion, self.released) {
            (Some(extra), false) => format!("{}{}", base, extra),
            _ => base,
        }
    }

    /// Directory prefix used inside the source archive, e.g. `linux-5.10/`.
    pub fn archive_prefix(&self) -> String {
        format!(
            "linux-{}.{}/",
            self.version.as_deref().unwrap_or_default(),
            self.patchlevel.as_deref().unwrap_or_default()
        )
    }

    /// Release-candidate number for `%define rcrev`.
    ///
    /// `0` for released kernels, otherwise the digits of `EXTRAVERSION`.
    /// `None` when an unreleased `EXTRAVERSION` carries no digits.
    pub fn rc_revision(&self) -> Option<String> {
        if self.released {
            return Some("0".to_string());
        }
        self.extraversion
            .as_deref()
            .map(|extra| extra.chars().filter(char::is_ascii_digit).collect::<String>())
            .filter(|digits| !digits.is_empty())
    }
}

/// Value of a `KEY = value` line: everything after the first `= `.
fn assignment_value(line: &str) -> Option<&str> {
    line.split_once("= ").map(|(_, value)| value)
}
