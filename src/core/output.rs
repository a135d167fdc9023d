//! Colored status output for kernel-package
//!
//! Uses owo-colors for terminal colors. Diagnostics that are only useful
//! when debugging go through `tracing` instead.

use owo_colors::OwoColorize;

/// Print an action header (blue, bold)
/// Example: "==> Fetching sources"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print an action with a counter (cyan)
/// Example: "(3/29) config-armv7"
pub fn action_numbered(current: usize, total: usize, message: &str) {
    println!("{} {}", format!("({}/{})", current, total).cyan(), message);
}

/// Print a detail line (dimmed)
/// Example: "     wrote sources/kernel.spec"
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a key/value line
/// Example: "Version: 5.10.0-rc3"
pub fn field(key: &str, value: &str) {
    println!("{} {}", format!("{}:", key).bold(), value);
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}
