//! Terminal styling for cardq.
//!
//! [`Highlighter`] colors the two documents cardq prints: effective settings as TOML and
//! parsed clauses as JSON. [`Paint`] styles single words, and [`paint_query`] colors a
//! query string by what each token does in it.

#![warn(missing_docs)]

use cardq_query::{Dialect, Operator, tokenize};
use syntect::{
    easy::HighlightLines,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Document formats cardq highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// `.cardq.toml` contents and `cardq config` output.
    Toml,
    /// `cardq parse --json` and `cardq tokens --json` output.
    Json,
}

impl Syntax {
    /// File extension syntect knows the grammar by.
    fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// 24-bit terminal highlighter for TOML and JSON.
pub struct Highlighter {
    /// Grammars, including TOML which syntect does not bundle.
    syntaxes: SyntaxSet,
    /// Lazily decoded color themes.
    themes: EmbeddedLazyThemeSet,
    /// Theme applied to every document.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntaxes: extra_syntaxes(),
            themes: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Returns `source` wrapped in terminal color escapes.
    ///
    /// Lines the grammar cannot handle are passed through uncolored.
    pub fn highlight(&self, source: &str, syntax: Syntax) -> String {
        let Some(grammar) = self.syntaxes.find_syntax_by_extension(syntax.extension()) else {
            return source.to_string();
        };
        let mut lines = HighlightLines::new(grammar, self.themes.get(self.theme));

        let mut out = String::with_capacity(source.len() * 2);
        for line in LinesWithEndings::from(source) {
            match lines.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
                Err(_) => out.push_str(line),
            }
        }
        out.push_str(Paint::RESET);
        out
    }
}

/// A text style for a single span of terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// Section titles and clause types.
    Heading,
    /// Sub-section titles and operators in clause trees.
    Strong,
    /// Numbering, placeholders and other secondary text.
    Faint,
    /// A clean `cardq check`.
    Good,
    /// Warnings.
    Caution,
    /// Keywords that open a clause.
    Prefix,
    /// Operator spellings inside a query.
    Operator,
    /// Quoted text and numbers inside a query.
    Literal,
}

impl Paint {
    /// Escape that clears every style.
    pub const RESET: &'static str = "\x1b[0m";

    /// SGR escape that turns the style on.
    fn code(self) -> &'static str {
        match self {
            Self::Heading => "\x1b[1;36m",
            Self::Strong => "\x1b[1m",
            Self::Faint => "\x1b[2m",
            Self::Good => "\x1b[32m",
            Self::Caution => "\x1b[33m",
            Self::Prefix => "\x1b[36m",
            Self::Operator => "\x1b[35m",
            Self::Literal => "\x1b[3;32m",
        }
    }

    /// Wraps `text` in this style.
    pub fn apply(self, text: &str) -> String {
        format!("{}{text}{}", self.code(), Self::RESET)
    }
}

/// Colors a query token by token: prefixes, operators, then literals.
///
/// Tokens are rejoined with single spaces and quoted tokens get their quotes back,
/// so the result reads like the normalized query.
pub fn paint_query(query: &str, dialect: &Dialect) -> String {
    tokenize(query)
        .map(|token| {
            if token.quoted {
                Paint::Literal.apply(&format!("\"{}\"", token.text))
            } else if dialect.prefix(&token.text).is_some() {
                Paint::Prefix.apply(&token.text)
            } else if token.text.parse::<Operator>().is_ok() {
                Paint::Operator.apply(&token.text)
            } else if token.text.parse::<i64>().is_ok() {
                Paint::Literal.apply(&token.text)
            } else {
                token.text
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indents every line of `content` by two spaces.
pub fn indent(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
