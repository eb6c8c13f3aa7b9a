//! Tokenizer and clause parser for the cardq card search language.
//!
//! A query is a sequence of clauses, each opened by a keyword prefix:
//!
//! - **Text**: `t:creature`, `name = "Niv-Mizzet, the Firemind"`, `set znr`
//! - **Colors**: `cmd < rg`, `c = red`
//! - **Numbers**: `cmc > 3`, `pow >= 2`, `|color| < 2`
//! - **Similarity**: `sim Elenda`, `similar to = Elenda`
//! - **Free text**: any word that opens no clause, e.g. `draw`
//!
//! Operators may be symbols (`>=`), keywords (`GTE`) or phrases (`TO NOT EQUAL`);
//! every clause carries one of six canonical operators, `EQ` when none is given.
//! Quoted values (`"Commander 2019"`) are exact matches.
//!
//! Parsing never fails. Input the parser cannot make sense of degrades to
//! free-text clauses.
//!
//! # Example
//!
//! ```
//! use cardq_query::{ClauseType, Operator, Value, generate_ast};
//!
//! let ast = generate_ast("cmc > 3 draw");
//! assert_eq!(ast.len(), 2);
//! assert_eq!(ast[0].clause_type, ClauseType::ConvertedManacost);
//! assert_eq!(ast[0].operator, Operator::Gt);
//! assert_eq!(ast[0].value, Value::number(3));
//! assert_eq!(ast[1].clause_type, ClauseType::Text);
//! ```

#![warn(missing_docs)]

mod ast;
mod error;
mod lexer;
mod parser;
mod table;

pub use ast::{
    COLOR_QUERY_ID, COLOR_VALUE_ID, COMMANDER_IDENTITY_QUERY_ID, CONVERTED_MANACOST_QUERY_ID,
    Clause, ClauseType, Color, ColorSet, NAME_QUERY_ID, NUMBER_OF_COLORS_QUERY_ID,
    NUMBER_OF_COMMANDER_IDENTITY_COLORS_QUERY_ID, NUMBER_OF_TYPES_QUERY_ID, NUMBER_VALUE_ID,
    Operator, POWER_QUERY_ID, SET_NAME_QUERY_ID, SET_QUERY_ID, SIMILARITY_QUERY_ID, TEXT_QUERY_ID,
    TEXT_VALUE_ID, TOUGHNESS_QUERY_ID, TYPE_QUERY_ID, Value, ValueKind, to_query_string,
};
pub use error::QueryError;
pub use lexer::{Token, Tokens, tokenize};
pub use parser::{generate_ast, generate_ast_with};
pub use table::{
    COLOR_NAMES, Dialect, OPERATORS, PREFIXES, PrefixEntry, builtin_prefix, is_builtin_keyword,
};
