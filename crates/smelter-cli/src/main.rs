//! smelter - custom feature-bundle builds from the command line.

use clap::Parser;
use smelter_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    let settings = commands::load_settings(args.config.as_deref(), args.source_root.as_deref());
    let settings_level = settings
        .as_ref()
        .ok()
        .and_then(|s| s.log_level.clone());

    logger::init_logger(
        args.verbose,
        args.quiet,
        args.no_color,
        settings_level.as_deref(),
    );
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => match settings {
            Ok(settings) => commands::build_execute(build_args, &settings, args.quiet).await,
            Err(err) => Err(err),
        },
        cli::Command::Components => commands::components_execute(),
        cli::Command::Synthesize(synth_args) => {
            commands::synthesize_execute(synth_args, args.quiet).await
        }
    };

    if let Err(err) = result {
        let code = err.exit_code();
        match err {
            error::CliError::BuildFailed { message } => ui::error(&message),
            other => eprintln!("{:?}", error::cli_error_to_miette(other)),
        }
        std::process::exit(code);
    }
}
