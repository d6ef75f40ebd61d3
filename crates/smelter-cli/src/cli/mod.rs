//! Command-line interface definition.
//!
//! - `smelter build` - run one custom build and print the result JSON
//! - `smelter components` - list the component catalogue and its imports
//! - `smelter synthesize` - print the aggregation source for a request

mod commands;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{BuildArgs, Command, RequestSource, SynthesizeArgs};

/// smelter - custom feature-bundle builds
#[derive(Parser, Debug)]
#[command(
    name = "smelter",
    version,
    about = "Build custom feature bundles of the analytics library",
    long_about = "smelter takes a build request naming the components an organisation wants,\n\
                  swaps a matching aggregation module into the library source, bundles it\n\
                  with Rolldown and restores the original file."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file (TOML or JSON); defaults to ./smelter.toml when present
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Library source root, overriding the settings file
    #[arg(long, global = true, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
