//! CLI error types.
//!
//! Library failures arrive as `smelter_config::ConfigError` or as a failed
//! `BuildResult`; both are folded into [`CliError`] and rendered through
//! miette at `main`.

mod miette;

pub use self::miette::cli_error_to_miette;

use smelter_config::ConfigError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded or are invalid
    #[error("Configuration error: {0}")]
    Config(#[source] ConfigError),

    /// The build request JSON was malformed
    #[error("Invalid build request: {0}")]
    Request(#[source] serde_json::Error),

    /// The build ran and failed; the result was already emitted
    #[error("{message}")]
    BuildFailed { message: String },

    /// A request or output path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidRequest(e) => CliError::Request(e),
            other => CliError::Config(other),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::BuildFailed { .. } => 1,
            _ => 2,
        }
    }
}

/// Attach a path to I/O failures.
pub trait ResultExt<T> {
    /// Map `NotFound` to [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CliError::FileNotFound(path.to_path_buf()),
            _ => CliError::Other(
                anyhow::Error::new(e).context(format!("failed to access {}", path.display())),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_are_separated_from_settings_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = ConfigError::InvalidRequest(json_err).into();
        assert!(matches!(err, CliError::Request(_)));

        let err: CliError = ConfigError::UnsupportedFormat("yaml".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_with_path_maps_not_found() {
        let missing = Path::new("/definitely/not/here.json");
        let err = std::fs::read_to_string(missing).with_path(missing).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(p) if p == missing));
    }

    #[test]
    fn test_exit_codes() {
        let failed = CliError::BuildFailed {
            message: "Failed bundle build: x".to_string(),
        };
        assert_eq!(failed.exit_code(), 1);
        assert_eq!(CliError::FileNotFound(PathBuf::from("x")).exit_code(), 2);
    }
}
