//! Command implementations.
//!
//! - [`build`] - run a custom build
//! - [`components`] - list the catalogue
//! - [`synthesize`] - print aggregation source

pub mod build;
pub mod components;
pub mod synthesize;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use components::execute as components_execute;
pub use synthesize::execute as synthesize_execute;
pub use utils::load_settings;
