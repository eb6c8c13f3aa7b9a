//! Query lexer (tokenizer).
//!
//! Splits a query string into whitespace-separated words and quoted spans.
//! Tokenizing never fails: an unclosed quote simply runs to the end of input.

use std::{iter::Peekable, str::CharIndices};

use serde::Serialize;

/// A word or quoted span of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The token text, with quotes stripped.
    pub text: String,
    /// True if the token came from a quoted span.
    pub quoted: bool,
    /// Byte offset of the token's first character (the opening quote, if quoted).
    pub position: usize,
}

impl Token {
    /// Creates an unquoted token.
    pub fn bare(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            quoted: false,
            position,
        }
    }

    /// Creates a quoted token.
    pub fn quoted(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            quoted: true,
            position,
        }
    }
}

/// Lazy token stream over a query string.
///
/// The stream is cheap to clone; a clone resumes from the same point, so a
/// caller can restart iteration without re-scanning what came before.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    /// Characters with their byte offsets, with one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokens<'a> {
    /// Creates a token stream for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    /// Reads a quoted span starting at the opening quote.
    fn read_quoted(&mut self, start: usize) -> Token {
        self.chars.next(); // consume opening quote

        let mut text = String::new();
        for (_, ch) in self.chars.by_ref() {
            if ch == '"' {
                break;
            }
            text.push(ch);
        }

        Token::quoted(text, start)
    }

    /// Reads a bare word up to whitespace or the start of a quoted span.
    fn read_word(&mut self, start: usize) -> Token {
        let mut text = String::new();

        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() || ch == '"' {
                break;
            }
            text.push(ch);
            self.chars.next();
        }

        Token::bare(text, start)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, ch)| ch.is_whitespace()).is_some() {}
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let &(start, ch) = self.chars.peek()?;
        if ch == '"' {
            Some(self.read_quoted(start))
        } else {
            Some(self.read_word(start))
        }
    }
}

/// Tokenizes a query string.
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens::new(input)
}
