//! Status lines.
//!
//! Each helper prints one glyph-prefixed line to stderr, so status output
//! never mixes with JSON on stdout.

use owo_colors::OwoColorize;

/// Print a green check followed by `message`.
///
/// # Examples
///
/// ```no_run
/// use smelter_cli::ui::success;
///
/// success("Wrote result.json");
/// ```
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green().bold(), message);
}

/// Print a neutral informational line.
///
/// # Examples
///
/// ```no_run
/// use smelter_cli::ui::info;
///
/// info("Building 3 components");
/// ```
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a yellow warning line.
///
/// # Examples
///
/// ```no_run
/// use smelter_cli::ui::warning;
///
/// warning("Ignoring unknown components: Nope");
/// ```
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an error line; used for build failures whose JSON went to stdout.
///
/// # Examples
///
/// ```no_run
/// use smelter_cli::ui::error;
///
/// error("Failed bundle build: Unexpected token (3:7)");
/// ```
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}
