//! Console output helpers shared by the command handlers.

use colored::Colorize;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Errors that are routed outcomes rather than command failures go to
/// stderr without aborting the process.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Dimmed `label: value` line, used for dashboard figures.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}
