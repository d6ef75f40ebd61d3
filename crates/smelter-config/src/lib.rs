//! # smelter-config
//!
//! Data model for custom build requests plus the layered settings that tell
//! the build service where its source tree lives.
//!
//! Requests come from callers as JSON ([`BuildConfiguration`]); settings come
//! from defaults, an optional `smelter.toml`, and `SMELTER_*` environment
//! variables ([`SmelterSettings`]).

pub mod component;
pub mod error;
pub mod request;
pub mod settings;

pub use component::ComponentName;
pub use error::*;
pub use request::BuildConfiguration;
pub use settings::{DEFAULT_SETTINGS_FILE, ENV_PREFIX, SmelterSettings};
