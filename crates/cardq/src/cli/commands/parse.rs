//! Implementation of `cardq parse`.

use std::process::ExitCode;

use cardq_config::OutputFormat;
use cardq_query::generate_ast_with;
use log::info;

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{OutputOptions, output_clauses},
};

/// Parses the query and prints its clauses.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let query = cmd.query.join(" ");
    let clauses = generate_ast_with(&query, &ctx.config.dialect);
    info!("parsed {} clause(s) from {query:?}", clauses.len());

    output_clauses(&clauses, resolve_options(ctx, cmd))
}

/// Combines command-line flags with the configured output defaults.
///
/// Flags win over configuration.
fn resolve_options(ctx: &CommandContext, cmd: &ParseCommand) -> OutputOptions {
    let settings = &ctx.config.output;
    let format = if cmd.json {
        OutputFormat::Json
    } else if cmd.tree {
        OutputFormat::Tree
    } else {
        settings.format
    };

    OutputOptions {
        format,
        compact: cmd.compact || settings.compact,
    }
}
