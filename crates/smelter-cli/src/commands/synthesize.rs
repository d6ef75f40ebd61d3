//! `smelter synthesize`

use smelter_bundler::{ComponentRegistry, synthesize};

use crate::cli::SynthesizeArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

pub async fn execute(args: SynthesizeArgs, quiet: bool) -> Result<()> {
    let request = utils::read_request(&args.request).await?;

    let unknown = request.unknown_components();
    if !unknown.is_empty() && !quiet {
        ui::warning(&format!("Ignoring unknown components: {}", unknown.join(", ")));
    }

    print!("{}", synthesize(&request, ComponentRegistry::standard()));
    Ok(())
}
