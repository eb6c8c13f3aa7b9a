//! Lookup tables for prefixes, operators, and colors.
//!
//! All tables are immutable statics; keyword matching is case-insensitive.
//! User-defined prefix aliases live in a [`Dialect`], which layers over the
//! built-in prefix table without replacing any of it.

use std::collections::BTreeMap;

use crate::{
    ast::{ClauseType, Color, Operator},
    lexer::Token,
};

/// A built-in prefix: keywords that open a clause of one type.
#[derive(Debug, Clone, Copy)]
pub struct PrefixEntry {
    /// Accepted spellings. A keyword may span several words, e.g. `similar to`.
    pub keywords: &'static [&'static str],
    /// The clause type the prefix opens.
    pub clause_type: ClauseType,
}

/// Built-in clause prefixes.
///
/// Each clause type has one canonical keyword (what [`ClauseType::keyword`] writes);
/// `commander`, `t`, `similar`, `similarTo` and `similar to` are the accepted long and
/// short forms. Further spellings belong in a user [`Dialect`].
pub static PREFIXES: &[PrefixEntry] = &[
    PrefixEntry {
        keywords: &["cmd", "commander"],
        clause_type: ClauseType::CommanderIdentity,
    },
    PrefixEntry {
        keywords: &["color"],
        clause_type: ClauseType::Color,
    },
    PrefixEntry {
        keywords: &["set"],
        clause_type: ClauseType::Set,
    },
    PrefixEntry {
        keywords: &["set_name"],
        clause_type: ClauseType::SetName,
    },
    PrefixEntry {
        keywords: &["name"],
        clause_type: ClauseType::Name,
    },
    PrefixEntry {
        keywords: &["t", "type"],
        clause_type: ClauseType::Type,
    },
    PrefixEntry {
        keywords: &["oracle"],
        clause_type: ClauseType::Text,
    },
    PrefixEntry {
        keywords: &["sim", "similar", "similarTo", "similar to"],
        clause_type: ClauseType::Similarity,
    },
    PrefixEntry {
        keywords: &["cmc"],
        clause_type: ClauseType::ConvertedManacost,
    },
    PrefixEntry {
        keywords: &["pow"],
        clause_type: ClauseType::Power,
    },
    PrefixEntry {
        keywords: &["tou"],
        clause_type: ClauseType::Toughness,
    },
    PrefixEntry {
        keywords: &["|color|"],
        clause_type: ClauseType::NumberOfColors,
    },
    PrefixEntry {
        keywords: &["|cmd|"],
        clause_type: ClauseType::NumberOfCommanderIdentityColors,
    },
    PrefixEntry {
        keywords: &["|type|"],
        clause_type: ClauseType::NumberOfTypes,
    },
];

/// Operator spellings in match priority order: keyword phrases, then single
/// keywords, then symbols.
pub static OPERATORS: &[(&str, Operator)] = &[
    ("TO NOT EQUAL", Operator::Neq),
    ("NOT EQUALS", Operator::Neq),
    ("TO EQUALS", Operator::Eq),
    ("TO EQUAL", Operator::Eq),
    ("EQUALS", Operator::Eq),
    ("GTE", Operator::Gte),
    ("GT", Operator::Gt),
    ("LT", Operator::Lt),
    ("LTE", Operator::Lte),
    ("EQ", Operator::Eq),
    ("NEQ", Operator::Neq),
    (">=", Operator::Gte),
    (">", Operator::Gt),
    ("=", Operator::Eq),
    ("!=", Operator::Neq),
    ("<=", Operator::Lte),
    ("<", Operator::Lt),
    (":", Operator::Eq),
];

/// Symbols that may be glued to a prefix (`cmc>=3`, `t:elf`), longest first.
pub static ATTACHED_OPERATORS: &[(&str, Operator)] = &[
    (">=", Operator::Gte),
    ("<=", Operator::Lte),
    ("!=", Operator::Neq),
    (">", Operator::Gt),
    ("<", Operator::Lt),
    ("=", Operator::Eq),
    (":", Operator::Eq),
];

/// Full color names.
pub static COLOR_NAMES: &[(&str, Color)] = &[
    ("white", Color::White),
    ("blue", Color::Blue),
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
];

/// Returns true if `words` spell out `phrase`, ignoring case.
pub fn spells(phrase: &str, words: &[&str]) -> bool {
    phrase.split_whitespace().count() == words.len()
        && phrase
            .split_whitespace()
            .zip(words)
            .all(|(expected, word)| expected.eq_ignore_ascii_case(word))
}

/// Returns how many leading tokens spell out `phrase`, if they do.
///
/// Quoted tokens are literal text and never match.
pub fn match_phrase(phrase: &str, tokens: &[Token]) -> Option<usize> {
    let len = phrase.split_whitespace().count();
    let spelled = phrase
        .split_whitespace()
        .zip(tokens.get(..len)?)
        .all(|(word, token)| !token.quoted && word.eq_ignore_ascii_case(&token.text));
    spelled.then_some(len)
}

/// Looks up a single-word built-in prefix.
pub fn builtin_prefix(word: &str) -> Option<ClauseType> {
    PREFIXES
        .iter()
        .find(|entry| entry.keywords.iter().any(|k| k.eq_ignore_ascii_case(word)))
        .map(|entry| entry.clause_type)
}

/// Returns true if `word` is a built-in prefix keyword.
pub fn is_builtin_keyword(word: &str) -> bool {
    builtin_prefix(word).is_some()
}

/// User-defined prefix aliases layered over the built-in table.
///
/// Aliases are single words. An alias that collides with a built-in keyword is
/// kept but never consulted, since built-in prefixes always match first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialect {
    /// Lower-cased alias keyword -> clause type.
    aliases: BTreeMap<String, ClauseType>,
}

impl Dialect {
    /// Creates a dialect with no aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alias, returning the updated dialect.
    pub fn with_alias(mut self, keyword: &str, clause_type: ClauseType) -> Self {
        self.insert(keyword, clause_type);
        self
    }

    /// Adds an alias, returning the clause type it previously mapped to.
    pub fn insert(&mut self, keyword: &str, clause_type: ClauseType) -> Option<ClauseType> {
        self.aliases.insert(keyword.to_lowercase(), clause_type)
    }

    /// Looks up an alias keyword.
    pub fn get(&self, keyword: &str) -> Option<ClauseType> {
        self.aliases.get(&keyword.to_lowercase()).copied()
    }

    /// Iterates aliases in keyword order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, ClauseType)> {
        self.aliases.iter().map(|(k, &t)| (k.as_str(), t))
    }

    /// Aliases that collide with a built-in keyword.
    pub fn shadowed(&self) -> impl Iterator<Item = (&str, ClauseType)> {
        self.aliases().filter(|(k, _)| is_builtin_keyword(k))
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if no aliases are defined.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Resolves a single-word prefix: built-in keywords first, then aliases.
    pub fn prefix(&self, word: &str) -> Option<ClauseType> {
        builtin_prefix(word).or_else(|| self.get(word))
    }
}
