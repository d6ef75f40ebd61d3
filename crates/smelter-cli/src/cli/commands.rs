use clap::{Args, Subcommand};
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one custom build and print the result as JSON
    ///
    /// Exits non-zero when the build fails; the JSON is printed either way.
    Build(BuildArgs),

    /// List the component catalogue with the module each one imports
    Components,

    /// Print the aggregation source a request would produce
    Synthesize(SynthesizeArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build request JSON file, or `-` for stdin
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub request: RequestSource,

    /// Minify the output regardless of the request
    #[arg(short, long)]
    pub minify: bool,

    /// Write the result JSON to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SynthesizeArgs {
    /// Build request JSON file, or `-` for stdin
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub request: RequestSource,
}

/// Where a build request is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// `-`
    Stdin,
    File(PathBuf),
}

impl FromStr for RequestSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => RequestSource::Stdin,
            path => RequestSource::File(PathBuf::from(path)),
        })
    }
}
