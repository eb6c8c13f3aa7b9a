//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use cardq_config::OutputFormat;
pub use cardq_highlight::Paint;
use cardq_highlight::{Highlighter, Syntax, paint_query};
use cardq_query::{Clause, Dialect, to_query_string};
use serde::Serialize;

/// Resolved output options for a single `parse` invocation.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Tree or JSON.
    pub format: OutputFormat,
    /// Single-line JSON.
    pub compact: bool,
}

/// Prints parsed clauses in the requested format.
pub fn output_clauses(clauses: &[Clause], options: OutputOptions) -> ExitCode {
    match options.format {
        OutputFormat::Tree => {
            print!("{}", render_tree(clauses));
            ExitCode::SUCCESS
        }
        OutputFormat::Json => output_json(clauses, options.compact),
    }
}

/// Serializes any value as JSON on stdout, highlighted when stdout is a terminal.
pub fn output_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> ExitCode {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            return ExitCode::FAILURE;
        }
    };

    if io::stdout().is_terminal() {
        println!("{}", Highlighter::new().highlight(&json, Syntax::Json));
    } else {
        println!("{json}");
    }
    ExitCode::SUCCESS
}

/// Renders clauses as a numbered tree with the normalized query as a footer.
pub fn render_tree(clauses: &[Clause]) -> String {
    if clauses.is_empty() {
        return format!("{}\n", Paint::Faint.apply("(no clauses)"));
    }

    let mut out = String::new();
    for (i, clause) in clauses.iter().enumerate() {
        out.push_str(&format!(
            "{} {} {}\n",
            Paint::Faint.apply(&format!("{}.", i + 1)),
            Paint::Heading.apply(clause.clause_type.id()),
            Paint::Strong.apply(clause.operator.id()),
        ));
        out.push_str(&format!("   {}\n", clause.value));
    }
    out.push('\n');
    // Written queries only use built-in keywords.
    let normalized = paint_query(&to_query_string(clauses), &Dialect::new());
    out.push_str(&format!("{} {normalized}\n", Paint::Faint.apply("normalized:")));
    out
}
