//! `moviedb` command-line front end.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;

use std::process::ExitCode;

use cli::{Cli, Command};

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let status = match cli.command {
        Command::Load(args) => commands::load(&cli.db, &args.dir).await?,
        Command::Check => commands::check(&cli.db).await?,
        Command::Report(args) => commands::report(&cli.db, &args).await?,
    };
    Ok(ExitCode::from(status))
}
