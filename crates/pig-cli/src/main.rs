//! PIG CLI: the `pig` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Check {
            package,
            checks,
            config,
            max_bytes,
            json,
        } => commands::check::run(commands::check::Args {
            package,
            checks,
            config,
            max_bytes,
            json,
        }),

        Commands::Checks { json } => commands::checks::run(json),
    }
}
