//! `smelter build`

use smelter_bundler::{BuildOrchestrator, BuildResult};
use smelter_config::SmelterSettings;
use std::time::Duration;

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Run one build and emit its result JSON.
///
/// The JSON is written on failure too; the returned error only carries the
/// exit status.
pub async fn execute(args: BuildArgs, settings: &SmelterSettings, quiet: bool) -> Result<()> {
    let mut request = utils::read_request(&args.request).await?;
    if args.minify {
        request.minify = true;
    }

    if !quiet {
        ui::info(&format!(
            "Building {} component(s) for {} from {}",
            request.known_components().len(),
            request.org_id,
            settings.source_root.display()
        ));
    }

    let result = BuildOrchestrator::from_settings(settings)
        .build(&request)
        .await;

    let json = result.to_json_pretty()?;
    match &args.out {
        Some(path) => tokio::fs::write(path, format!("{json}\n"))
            .await
            .with_path(path)?,
        None => println!("{json}"),
    }

    match result {
        BuildResult::Success {
            elapsed_time_ms,
            chunks,
        } => {
            if !quiet {
                ui::print_build_summary(&chunks, Duration::from_secs_f64(elapsed_time_ms / 1000.0));
                ui::success("Build complete");
            }
            Ok(())
        }
        BuildResult::Failure { message, .. } => Err(CliError::BuildFailed { message }),
    }
}
