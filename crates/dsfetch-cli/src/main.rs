//! dsfetch CLI - Command-line utility that downloads and unpacks dataset
//! archives.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli::Commands;
use error::AlreadyReported;
use output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Completion(args) = &cli.command {
        commands::completion::execute(args.shell);
        return ExitCode::SUCCESS;
    }

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    if let Err(err) = logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        formatter.format_error(cli.command.name(), &err);
        return ExitCode::FAILURE;
    }

    match dispatch(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is::<AlreadyReported>() {
                formatter.format_error(cli.command.name(), &err);
            }
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let settings = commands::load_settings(cli.config.as_deref())?;
    let show_progress = !cli.quiet && !cli.json;

    match &cli.command {
        Commands::Download(args) => commands::download::execute(args, &settings, formatter),
        Commands::Extract(args) => {
            commands::extract::execute(args, &settings, formatter, show_progress)
        }
        Commands::Run(args) => commands::run::execute(args, &settings, formatter, show_progress),
        Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
