//! Terminal styling utilities for consistent CLI output

use colored::Colorize;

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a warning message to stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print a success message to stdout
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a hint message to stderr (dimmed)
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

/// Print a section header (cyan, bold)
pub fn header(msg: &str) {
    println!("{}", msg.cyan().bold());
}

/// Print a status update (scope loaded, server address)
pub fn status(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Format a path for display (bright white)
pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Format a URL for display
pub fn url(u: &str) -> String {
    u.bright_blue().underline().to_string()
}
