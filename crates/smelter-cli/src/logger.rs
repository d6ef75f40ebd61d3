//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so that `build` and `synthesize` output on stdout stays
//! machine-readable.

use smelter_bundler::logging::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const SMELTER_CRATES: &[&str] = &["smelter_cli", "smelter_bundler", "smelter_config"];

/// Filter directives for the smelter crates at `level`.
pub fn smelter_directives(level: &str) -> String {
    SMELTER_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Level named by the settings file; unrecognised or absent values mean
/// info.
pub fn settings_level(level: Option<&str>) -> LogLevel {
    match level.map(str::parse::<LogLevel>) {
        Some(Ok(level)) => level,
        Some(Err(err)) => {
            eprintln!("warning: {err}; using info");
            LogLevel::Info
        }
        None => LogLevel::Info,
    }
}

/// Choose the filter: `--verbose` beats `--quiet`, which beats `RUST_LOG`,
/// which beats the settings file's `log_level`; the fallback is info.
pub fn build_filter(verbose: bool, quiet: bool, settings_level: Option<&str>) -> EnvFilter {
    if verbose {
        EnvFilter::new(smelter_directives(&LogLevel::Debug.to_string()))
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(smelter_directives(
                &self::settings_level(settings_level).to_string(),
            ))
        })
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, settings_level: Option<&str>) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet, settings_level))
        .with(fmt_layer)
        .try_init();
}
