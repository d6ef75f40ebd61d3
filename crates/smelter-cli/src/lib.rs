//! smelter CLI.
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - command implementations
//! - [`error`] - error types and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - stderr status output

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
