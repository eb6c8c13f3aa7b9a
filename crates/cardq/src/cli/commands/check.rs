//! Implementation of `cardq check`.

use std::process::ExitCode;

use cardq_config::{Config, ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::Paint,
};

/// Exit codes for `cardq check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("{}", Paint::Faint.apply("No configuration files found."));
        println!();
        println!("Run 'cardq init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("{}", Paint::Strong.apply("Config files (highest precedence first):"));
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(hint) = e.suggestion() {
                eprintln!("hint: {hint}");
            }
            return exit_codes::ERROR;
        }
    };

    println!("{}", Paint::Strong.apply("Aliases:"));
    if config.dialect.is_empty() {
        println!("  {}", Paint::Faint.apply("(none defined)"));
    } else {
        for (keyword, clause_type) in config.dialect.aliases() {
            println!(
                "  {} {}",
                Paint::Prefix.apply(keyword),
                Paint::Faint.apply(&format!("-> {clause_type}"))
            );
        }
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("{}", Paint::Good.apply("No issues found."));
        return exit_codes::OK;
    }

    println!("{}", Paint::Caution.apply(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("  - {w}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::AliasShadowsBuiltin { .. } => {
                "Built-in keywords always win; pick an alias that is not a built-in prefix."
            }
            ConfigWarning::AliasIsOperator { .. } => {
                "An alias spelled like an operator is read as the operator after a prefix."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
