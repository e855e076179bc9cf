// spritegen-cli/src/main.rs
//
// Entry point for the spritegen command-line tool.
//
// Responsibilities include:
// - Parsing command-line arguments (see cli.rs)
// - Initializing env_logger-based logging
// - Dispatching to the subcommand implementations in commands/
// - Mapping failures to a non-zero exit code

use clap::Parser;
use std::process;

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use cli::{Cli, Commands};

fn main() {
    logging::init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run_generate(args),
        Commands::Info(args) => commands::info::run_info(args),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        process::exit(1);
    }
}
