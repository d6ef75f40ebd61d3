//! Service settings: where the source tree lives and how builds run.
//!
//! Priority, lowest first: defaults, settings file (`smelter.toml` in the
//! working directory or an explicit path), `SMELTER_*` environment
//! variables. Callers can merge their own overrides on top of
//! [`SmelterSettings::figment`] before extracting.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Settings file picked up from the working directory when present.
pub const DEFAULT_SETTINGS_FILE: &str = "smelter.toml";

/// Prefix for environment overrides, e.g. `SMELTER_SOURCE_ROOT`.
pub const ENV_PREFIX: &str = "SMELTER_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmelterSettings {
    /// Root of the library source tree the bundler reads.
    pub source_root: PathBuf,

    /// Entry module, relative to `source_root`.
    pub entry: PathBuf,

    /// Aggregation file swapped for every build, relative to `source_root`.
    pub aggregation_file: PathBuf,

    /// Upper bound on one engine generate step. No deadline when unset.
    pub engine_timeout_ms: Option<u64>,

    pub log_level: Option<String>,
}

impl Default for SmelterSettings {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("alloy"),
            entry: PathBuf::from("src/index.js"),
            aggregation_file: PathBuf::from("src/core/componentCreators.js"),
            engine_timeout_ms: None,
            log_level: None,
        }
    }
}

impl SmelterSettings {
    /// Layered figment without any caller overrides.
    ///
    /// An explicit `config_path` must exist; the default settings file is
    /// optional.
    pub fn figment(config_path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let settings_file = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = settings_file {
            tracing::debug!("Loading settings from {}", path.display());
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                other => {
                    return Err(ConfigError::UnsupportedFormat(
                        other.unwrap_or("<none>").to_string(),
                    ));
                }
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load and validate settings from all layers.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::extract(Self::figment(config_path)?)
    }

    /// Extract and validate settings from a prepared figment.
    pub fn extract(figment: Figment) -> Result<Self> {
        let settings: Self = figment
            .extract()
            .map_err(|e| ConfigError::invalid("settings", e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        validate_relative("entry", &self.entry)?;
        validate_relative("aggregation_file", &self.aggregation_file)?;

        if self.source_root.as_os_str().is_empty() {
            return Err(ConfigError::invalid(
                "source_root",
                "source root must not be empty",
            ));
        }

        if self.engine_timeout_ms == Some(0) {
            return Err(ConfigError::invalid(
                "engine_timeout_ms",
                "timeout must be greater than zero; omit it to disable the deadline",
            ));
        }

        Ok(())
    }

    pub fn entry_path(&self) -> PathBuf {
        self.source_root.join(&self.entry)
    }

    pub fn aggregation_path(&self) -> PathBuf {
        self.source_root.join(&self.aggregation_file)
    }

    pub fn engine_timeout(&self) -> Option<Duration> {
        self.engine_timeout_ms.map(Duration::from_millis)
    }
}

fn validate_relative(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::invalid(field, "path must not be empty"));
    }
    if path.is_absolute() {
        return Err(ConfigError::invalid(
            field,
            format!(
                "'{}' must be relative to source_root",
                path.display()
            ),
        ));
    }
    Ok(())
}
