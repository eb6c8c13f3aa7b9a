//! Implementation of `cardq config`.

use std::process::ExitCode;

use cardq_highlight::{Highlighter, Syntax};

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let toml = match ctx.config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: failed to serialize settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    print!("{}", Highlighter::new().highlight(&toml, Syntax::Toml));
    ExitCode::SUCCESS
}
