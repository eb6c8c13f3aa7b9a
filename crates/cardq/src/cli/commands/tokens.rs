//! Implementation of `cardq tokens`.

use std::process::ExitCode;

use cardq_highlight::paint_query;
use cardq_query::{Dialect, Token, tokenize};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};

use crate::cli::{
    args::TokensCommand,
    context::CommandContext,
    output::{Paint, output_json},
};

/// Prints the tokens of a query as a table or JSON.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
    let query = cmd.query.join(" ");
    let tokens: Vec<Token> = tokenize(&query).collect();

    if cmd.json {
        return output_json(&tokens, false);
    }

    if tokens.is_empty() {
        println!("{}", Paint::Faint.apply("(no tokens)"));
        return ExitCode::SUCCESS;
    }

    println!("{}", paint_query(&query, &ctx.config.dialect));
    println!("{}", token_table(&tokens, &ctx.config.dialect));
    ExitCode::SUCCESS
}

/// Builds the token table, noting which clause type each bare keyword opens.
fn token_table(tokens: &[Token], dialect: &Dialect) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Offset", "Quoted", "Text", "Opens"]);

    for (i, token) in tokens.iter().enumerate() {
        let opens = if token.quoted {
            None
        } else {
            dialect.prefix(&token.text)
        };
        table.add_row(vec![
            Cell::new(i),
            Cell::new(token.position),
            Cell::new(if token.quoted { "yes" } else { "" }),
            Cell::new(&token.text),
            Cell::new(opens.map(|t| t.id()).unwrap_or_default()),
        ]);
    }

    table
}
