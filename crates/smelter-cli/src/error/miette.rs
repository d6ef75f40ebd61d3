//! Miette rendering for CLI errors.

use crate::error::CliError;
use miette::{MietteDiagnostic, Report};
use smelter_config::ConfigError;

/// Convert a CliError into a miette report with a code and, where useful, a
/// hint.
pub fn cli_error_to_miette(err: CliError) -> Report {
    let diagnostic = match &err {
        CliError::Config(config) => {
            let diagnostic = MietteDiagnostic::new(err.to_string()).with_code("smelter::config");
            match config {
                ConfigError::NotFound(_) => {
                    diagnostic.with_help("Pass an existing file to --config or drop the flag")
                }
                ConfigError::UnsupportedFormat(_) => {
                    diagnostic.with_help("Settings files must end in .toml or .json")
                }
                _ => diagnostic,
            }
        }
        CliError::Request(_) => MietteDiagnostic::new(err.to_string())
            .with_code("smelter::request")
            .with_help(
                "Expected {\"orgId\": ..., \"edgeConfigId\": ..., \"includedComponents\": [...], \"minify\": false}",
            ),
        CliError::BuildFailed { message } => {
            MietteDiagnostic::new(message.clone()).with_code("smelter::build")
        }
        CliError::FileNotFound(_) => {
            MietteDiagnostic::new(err.to_string()).with_code("smelter::io")
        }
        _ => MietteDiagnostic::new(err.to_string()),
    };
    Report::new(diagnostic)
}
