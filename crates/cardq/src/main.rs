//! cardq: a parser for the card search language.
//!
//! cardq turns queries such as `t:creature cmc > 3 cmd < rg draw` into a flat list of
//! typed clauses. The `parse` command prints that list as a tree or as the JSON consumed
//! by search backends; `tokens` shows how the query was split before parsing.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::{CommandContext, args::Cli, commands};
use log::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = match CommandContext::load(cli.command.config_mode()) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Initializes stderr logging at a level chosen by the number of `-v` flags.
///
/// `RUST_LOG` takes precedence over the flag when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}
