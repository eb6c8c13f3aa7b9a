//! Clause parser.
//!
//! Turns a token stream into a flat list of clauses, left to right:
//!
//! ```text
//! query   → clause*
//! clause  → prefix operator? value | WORD
//! prefix  → KEYWORD | KEYWORD ":" | KEYWORD SYMBOL | KEYWORD ":" VALUE | KEYWORD SYMBOL VALUE
//! ```
//!
//! Parsing never fails. A word that opens no clause becomes a free-text
//! clause. A clause that cannot be completed is abandoned:
//!
//! - a numeric clause whose value is not an integer emits nothing, and parsing
//!   resumes at the offending token;
//! - a prefix with no value before the end of input is emitted as free text.

use log::{debug, trace};

use crate::{
    ast::{Clause, ClauseType, Color, ColorSet, Operator, Value, ValueKind},
    lexer::{Token, tokenize},
    table::{ATTACHED_OPERATORS, Dialect, OPERATORS, PREFIXES, match_phrase},
};

/// A recognized clause prefix.
struct Opening {
    /// The clause type the prefix opens.
    clause_type: ClauseType,
    /// Operator glued to the prefix, e.g. the `>` in `cmc>3`.
    operator: Option<Operator>,
    /// Value glued to the prefix, e.g. the `3` in `cmc>3`.
    value: Option<String>,
    /// Number of tokens the prefix spans.
    len: usize,
}

/// Left-to-right clause parser.
struct Parser<'d> {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in token stream.
    position: usize,
    /// User aliases consulted after the built-in prefixes.
    dialect: &'d Dialect,
}

impl<'d> Parser<'d> {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Token>, dialect: &'d Dialect) -> Self {
        Self {
            tokens,
            position: 0,
            dialect,
        }
    }

    /// Parses every clause in the token stream.
    fn parse(mut self) -> Vec<Clause> {
        let mut clauses = Vec::new();

        while self.position < self.tokens.len() {
            if let Some(clause) = self.parse_clause() {
                trace!("clause: {}", clause.to_query_string());
                clauses.push(clause);
            }
        }

        clauses
    }

    /// Parses one clause. Always consumes at least one token.
    fn parse_clause(&mut self) -> Option<Clause> {
        let start = self.position;

        let Some(opening) = self.match_prefix() else {
            return Some(self.free_text());
        };
        self.position += opening.len;

        let operator = match opening.operator {
            Some(op) => op,
            None => self.match_operator().unwrap_or_default(),
        };

        let (text, quoted, glued) = match opening.value {
            Some(text) => (text, false, true),
            None => match self.peek() {
                Some(token) => (token.text.clone(), token.quoted, false),
                None => {
                    debug!(
                        "no value for '{}' at end of query, treating it as text",
                        self.tokens[start].text
                    );
                    self.position = start;
                    return Some(self.free_text());
                }
            },
        };

        let Some(value) = parse_value(opening.clause_type.value_kind(), &text, quoted) else {
            debug!(
                "'{text}' is not a number, dropping {} clause",
                opening.clause_type
            );
            if glued {
                return Some(Clause::free_text(text, false));
            }
            // Resume at the offending token so it becomes a clause of its own.
            return None;
        };

        if !glued {
            self.advance();
        }

        Some(Clause::new(opening.clause_type, operator, value))
    }

    /// Matches a clause prefix at the current position without consuming it.
    ///
    /// Built-in keywords are tried first, then user aliases, then prefixes with a
    /// glued operator (`t:elf`, `cmc>=3`). Among built-in spellings the one that
    /// leaves the longest prefix-plus-operator run wins, ties going to the longer
    /// prefix: `similar to = x` opens with `similar to`, while `similar TO EQUAL x`
    /// opens with `similar` and keeps `TO EQUAL` as its operator.
    fn match_prefix(&self) -> Option<Opening> {
        let rest = &self.tokens[self.position..];
        let token = rest.first().filter(|t| !t.quoted)?;

        let builtin = PREFIXES
            .iter()
            .flat_map(|entry| {
                entry
                    .keywords
                    .iter()
                    .filter_map(move |k| match_phrase(k, rest).map(|len| (entry.clause_type, len)))
            })
            .max_by_key(|&(_, len)| {
                let operator_len = operator_at(&rest[len..]).map_or(0, |(n, _)| n);
                (len + operator_len, len)
            });

        if let Some((clause_type, len)) = builtin {
            return Some(Opening {
                clause_type,
                operator: None,
                value: None,
                len,
            });
        }

        if let Some(clause_type) = self.dialect.get(&token.text) {
            return Some(Opening {
                clause_type,
                operator: None,
                value: None,
                len: 1,
            });
        }

        self.match_glued_prefix(&token.text)
    }

    /// Matches a keyword with an operator glued to it, e.g. `pow>=2` or `set_name:`.
    fn match_glued_prefix(&self, text: &str) -> Option<Opening> {
        let split = text.find(|c: char| matches!(c, ':' | '<' | '>' | '=' | '!'))?;
        let (keyword, rest) = text.split_at(split);
        let clause_type = self.dialect.prefix(keyword)?;

        let &(symbol, operator) = ATTACHED_OPERATORS
            .iter()
            .find(|(symbol, _)| rest.starts_with(*symbol))?;
        let value = &rest[symbol.len()..];

        Some(Opening {
            clause_type,
            operator: Some(operator),
            value: (!value.is_empty()).then(|| value.to_string()),
            len: 1,
        })
    }

    /// Matches and consumes an operator at the current position.
    fn match_operator(&mut self) -> Option<Operator> {
        let (len, operator) = operator_at(&self.tokens[self.position..])?;
        self.position += len;
        Some(operator)
    }

    /// Consumes the current token as a free-text clause.
    fn free_text(&mut self) -> Clause {
        let token = &self.tokens[self.position];
        let clause = Clause::free_text(token.text.clone(), token.quoted);
        self.advance();
        clause
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Returns the token count and operator of the first spelling that starts `tokens`.
fn operator_at(tokens: &[Token]) -> Option<(usize, Operator)> {
    OPERATORS
        .iter()
        .find_map(|&(spelling, op)| match_phrase(spelling, tokens).map(|len| (len, op)))
}

/// Parses a value token according to the clause's value kind.
///
/// Returns `None` only for numeric kinds given something other than an integer.
fn parse_value(kind: ValueKind, text: &str, quoted: bool) -> Option<Value> {
    match kind {
        ValueKind::Number => text.parse().ok().map(Value::number),
        ValueKind::Color => Some(Value::Color {
            value: parse_colors(text),
        }),
        ValueKind::Text => Some(Value::text(text, quoted)),
    }
}

/// Maps a color name (`red`) or a run of color letters (`rg`) to colors.
///
/// Unrecognized letters are dropped.
fn parse_colors(text: &str) -> ColorSet {
    if let Some(color) = Color::from_name(text) {
        return [color].into_iter().collect();
    }
    text.chars().filter_map(Color::from_letter).collect()
}

/// Parses a query string into clauses using the built-in prefixes.
pub fn generate_ast(input: &str) -> Vec<Clause> {
    generate_ast_with(input, &Dialect::default())
}

/// Parses a query string into clauses, also recognizing the dialect's aliases.
pub fn generate_ast_with(input: &str, dialect: &Dialect) -> Vec<Clause> {
    Parser::new(tokenize(input).collect(), dialect).parse()
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn clause(clause_type: ClauseType, operator: Operator, value: Value) -> Clause {
        Clause::new(clause_type, operator, value)
    }

    fn text(s: &str) -> Value {
        Value::text(s, false)
    }

    fn exact(s: &str) -> Value {
        Value::text(s, true)
    }

    fn free(s: &str) -> Clause {
        Clause::free_text(s, false)
    }

    fn red() -> Value {
        Value::colors([Color::Red])
    }

    #[test]
    fn empty_query() {
        assert_eq!(generate_ast(""), vec![]);
        assert_eq!(generate_ast("   "), vec![]);
    }

    #[test]
    fn handles_every_operator_spelling() {
        let spellings = [
            (">=", Operator::Gte),
            (">", Operator::Gt),
            ("=", Operator::Eq),
            ("!=", Operator::Neq),
            ("<=", Operator::Lte),
            ("<", Operator::Lt),
            ("GTE", Operator::Gte),
            ("GT", Operator::Gt),
            ("LT", Operator::Lt),
            ("LTE", Operator::Lte),
            ("EQ", Operator::Eq),
            ("NEQ", Operator::Neq),
            ("EQUALS", Operator::Eq),
            ("TO EQUAL", Operator::Eq),
            ("TO EQUALS", Operator::Eq),
            ("TO NOT EQUAL", Operator::Neq),
            ("NOT EQUALS", Operator::Neq),
        ];

        for (spelling, expected) in spellings {
            let query = format!("cmd {spelling} r");
            assert_eq!(
                generate_ast(&query),
                vec![clause(ClauseType::CommanderIdentity, expected, red())],
                "failed for: {query}"
            );
        }
    }

    #[test]
    fn keyword_operators_ignore_case() {
        assert_eq!(
            generate_ast("cmd to not equal r"),
            vec![clause(ClauseType::CommanderIdentity, Operator::Neq, red())]
        );
    }

    #[test]
    fn single_color_query() {
        assert_eq!(
            generate_ast("cmd < r"),
            vec![clause(ClauseType::CommanderIdentity, Operator::Lt, red())]
        );
    }

    #[test]
    fn single_color_query_full_name() {
        assert_eq!(
            generate_ast("cmd < red"),
            vec![clause(ClauseType::CommanderIdentity, Operator::Lt, red())]
        );
        assert_eq!(
            generate_ast("cmd = BLUE"),
            vec![clause(
                ClauseType::CommanderIdentity,
                Operator::Eq,
                Value::colors([Color::Blue])
            )]
        );
    }

    #[test]
    fn multiple_color_query() {
        assert_eq!(
            generate_ast("cmd < rg"),
            vec![clause(
                ClauseType::CommanderIdentity,
                Operator::Lt,
                Value::colors([Color::Red, Color::Green])
            )]
        );
    }

    #[test]
    fn color_letters_dedupe_and_drop_unknown() {
        assert_eq!(
            generate_ast("color gxRgw"),
            vec![clause(
                ClauseType::Color,
                Operator::Eq,
                Value::colors([Color::Green, Color::Red, Color::White])
            )]
        );
    }

    #[test]
    fn number_of_colors_query() {
        assert_eq!(
            generate_ast("|color| < 2"),
            vec![clause(ClauseType::NumberOfColors, Operator::Lt, Value::number(2))]
        );
    }

    #[test]
    fn number_of_commander_colors_query() {
        assert_eq!(
            generate_ast("|cmd| = 2"),
            vec![clause(
                ClauseType::NumberOfCommanderIdentityColors,
                Operator::Eq,
                Value::number(2)
            )]
        );
    }

    #[test]
    fn number_of_types_query() {
        assert_eq!(
            generate_ast("|type| > 2"),
            vec![clause(ClauseType::NumberOfTypes, Operator::Gt, Value::number(2))]
        );
    }

    #[test]
    fn similarity_synonyms() {
        let expected = vec![clause(ClauseType::Similarity, Operator::Eq, text("Elenda"))];
        for query in [
            "sim Elenda",
            "sim = Elenda",
            "similar Elenda",
            "similarTo Elenda",
            "similar = Elenda",
            "similarTo = Elenda",
            "similar to = Elenda",
            "similar to Elenda",
        ] {
            assert_eq!(generate_ast(query), expected, "failed for: {query}");
        }
    }

    #[test]
    fn similarity_with_every_operator_spelling() {
        for prefix in ["sim", "similar", "similarTo", "similar to"] {
            for &(spelling, operator) in OPERATORS {
                let query = format!("{prefix} {spelling} Elenda");
                assert_eq!(
                    generate_ast(&query),
                    vec![clause(ClauseType::Similarity, operator, text("Elenda"))],
                    "failed for: {query}"
                );
            }
        }
    }

    #[test]
    fn similar_to_phrase_operators_ignore_case() {
        assert_eq!(
            generate_ast("similar to not equal Elenda"),
            vec![clause(ClauseType::Similarity, Operator::Neq, text("Elenda"))]
        );
        assert_eq!(
            generate_ast("SIMILAR TO TO EQUALS Elenda"),
            vec![clause(ClauseType::Similarity, Operator::Eq, text("Elenda"))]
        );
    }

    #[test]
    fn every_prefix_with_every_operator_spelling() {
        for entry in PREFIXES {
            let (value_text, value) = match entry.clause_type.value_kind() {
                ValueKind::Number => ("3", Value::number(3)),
                ValueKind::Color => ("r", red()),
                ValueKind::Text => ("x", text("x")),
            };
            for keyword in entry.keywords {
                for &(spelling, operator) in OPERATORS {
                    let query = format!("{keyword} {spelling} {value_text}");
                    assert_eq!(
                        generate_ast(&query),
                        vec![clause(entry.clause_type, operator, value.clone())],
                        "failed for: {query}"
                    );
                }
            }
        }
    }

    #[test]
    fn text_values_spelled_like_operators_or_keywords() {
        assert_eq!(
            generate_ast("name = GT"),
            vec![clause(ClauseType::Name, Operator::Eq, text("GT"))]
        );
        assert_eq!(
            generate_ast("name = cmc"),
            vec![clause(ClauseType::Name, Operator::Eq, text("cmc"))]
        );
        assert_eq!(
            generate_ast("t = \"GT\""),
            vec![clause(ClauseType::Type, Operator::Eq, exact("GT"))]
        );
        assert_eq!(
            generate_ast("t EQ TO"),
            vec![clause(ClauseType::Type, Operator::Eq, text("TO"))]
        );
    }

    #[test]
    fn operator_without_value_becomes_text() {
        assert_eq!(generate_ast("t GT"), vec![free("t"), free("GT")]);
        assert_eq!(
            generate_ast("name TO EQUAL"),
            vec![free("name"), free("TO"), free("EQUAL")]
        );
    }

    #[test]
    fn unlisted_shorthands_are_free_text() {
        assert_eq!(generate_ast("o ring"), vec![free("o"), free("ring")]);
        assert_eq!(generate_ast("c x"), vec![free("c"), free("x")]);
        assert_eq!(generate_ast("mv 3"), vec![free("mv"), free("3")]);
    }

    #[test]
    fn similarity_exact_synonyms() {
        let expected = vec![clause(ClauseType::Similarity, Operator::Eq, exact("Elenda"))];
        for query in [
            "sim \"Elenda\"",
            "sim = \"Elenda\"",
            "similar \"Elenda\"",
            "similarTo \"Elenda\"",
            "similar = \"Elenda\"",
            "similarTo = \"Elenda\"",
            "similar to = \"Elenda\"",
        ] {
            assert_eq!(generate_ast(query), expected, "failed for: {query}");
        }
    }

    #[test]
    fn quoted_value_keeps_special_characters() {
        assert_eq!(
            generate_ast("name = \"Arguel's Blood Fast // Temple of Aclazotz\""),
            vec![clause(
                ClauseType::Name,
                Operator::Eq,
                exact("Arguel's Blood Fast // Temple of Aclazotz")
            )]
        );
    }

    #[test]
    fn complex_query() {
        let query = "t:creature set = znr cmc > 3 pow > 1 tou < 10 cmd < r \
                     name = \"Niv-Mizzet, the Firemind\" draw discard";
        assert_eq!(
            generate_ast(query),
            vec![
                clause(ClauseType::Type, Operator::Eq, text("creature")),
                clause(ClauseType::Set, Operator::Eq, text("znr")),
                clause(ClauseType::ConvertedManacost, Operator::Gt, Value::number(3)),
                clause(ClauseType::Power, Operator::Gt, Value::number(1)),
                clause(ClauseType::Toughness, Operator::Lt, Value::number(10)),
                clause(ClauseType::CommanderIdentity, Operator::Lt, red()),
                clause(ClauseType::Name, Operator::Eq, exact("Niv-Mizzet, the Firemind")),
                free("draw"),
                free("discard"),
            ]
        );
    }

    #[test]
    fn set_name_with_colon() {
        assert_eq!(
            generate_ast("set_name: \"Commander 2019\""),
            vec![clause(ClauseType::SetName, Operator::Eq, exact("Commander 2019"))]
        );
    }

    #[test]
    fn apostrophe_words_fall_back_to_text() {
        assert_eq!(
            generate_ast("commander's sphere"),
            vec![free("commander's"), free("sphere")]
        );
    }

    #[test]
    fn quoted_free_text_is_exact() {
        assert_eq!(
            generate_ast("\"draw a card\" flying"),
            vec![Clause::free_text("draw a card", true), free("flying")]
        );
    }

    #[test]
    fn quoted_keyword_is_literal_text() {
        assert_eq!(
            generate_ast("\"cmd\" r"),
            vec![Clause::free_text("cmd", true), free("r")]
        );
    }

    #[test]
    fn glued_operator_and_value() {
        assert_eq!(
            generate_ast("cmc>=3 pow!=2 cmd<ur"),
            vec![
                clause(ClauseType::ConvertedManacost, Operator::Gte, Value::number(3)),
                clause(ClauseType::Power, Operator::Neq, Value::number(2)),
                clause(
                    ClauseType::CommanderIdentity,
                    Operator::Lt,
                    Value::colors([Color::Blue, Color::Red])
                ),
            ]
        );
    }

    #[test]
    fn glued_operator_with_quoted_value() {
        assert_eq!(
            generate_ast("t:\"legendary creature\""),
            vec![clause(ClauseType::Type, Operator::Eq, exact("legendary creature"))]
        );
    }

    #[test]
    fn keyword_prefixes_ignore_case() {
        assert_eq!(
            generate_ast("CMC > 2 Type = elf"),
            vec![
                clause(ClauseType::ConvertedManacost, Operator::Gt, Value::number(2)),
                clause(ClauseType::Type, Operator::Eq, text("elf")),
            ]
        );
    }

    #[test]
    fn negative_numbers() {
        assert_eq!(
            generate_ast("pow > -1"),
            vec![clause(ClauseType::Power, Operator::Gt, Value::number(-1))]
        );
    }

    #[test]
    fn non_numeric_value_resumes_at_offending_token() {
        assert_eq!(generate_ast("cmc > abc"), vec![free("abc")]);
        assert_eq!(generate_ast("pow x draw"), vec![free("x"), free("draw")]);
    }

    #[test]
    fn non_numeric_value_can_open_next_clause() {
        assert_eq!(
            generate_ast("cmc t:elf"),
            vec![clause(ClauseType::Type, Operator::Eq, text("elf"))]
        );
    }

    #[test]
    fn non_numeric_glued_value_becomes_text() {
        assert_eq!(generate_ast("pow>* draw"), vec![free("*"), free("draw")]);
    }

    #[test]
    fn prefix_without_value_becomes_text() {
        assert_eq!(generate_ast("creature type"), vec![free("creature"), free("type")]);
        assert_eq!(generate_ast("draw cmc >"), vec![free("draw"), free("cmc"), free(">")]);
    }

    #[test]
    fn color_value_with_no_letters_is_empty() {
        assert_eq!(
            generate_ast("cmd = xyz"),
            vec![clause(
                ClauseType::CommanderIdentity,
                Operator::Eq,
                Value::Color {
                    value: ColorSet::new()
                }
            )]
        );
    }

    #[test]
    fn value_kinds_match_clause_types() {
        let query = "cmd r color g set x set_name y name z t w oracle v sim u cmc 1 pow 2 tou 3 \
                     |color| 4 |cmd| 5 |type| 6 free";
        let clauses = generate_ast(query);
        assert_eq!(clauses.len(), 15);
        for c in clauses {
            assert_eq!(c.value.kind(), c.clause_type.value_kind(), "{c:?}");
        }
    }

    #[test]
    fn dialect_aliases_open_clauses() {
        let dialect = Dialect::new()
            .with_alias("edh", ClauseType::CommanderIdentity)
            .with_alias("card", ClauseType::Name);
        assert_eq!(
            generate_ast_with("edh <= wu card:Opt", &dialect),
            vec![
                clause(
                    ClauseType::CommanderIdentity,
                    Operator::Lte,
                    Value::colors([Color::White, Color::Blue])
                ),
                clause(ClauseType::Name, Operator::Eq, text("Opt")),
            ]
        );
        assert_eq!(generate_ast("edh wu"), vec![free("edh"), free("wu")]);
    }

    #[test]
    fn query_string_round_trip() {
        let query = "t:creature set = znr cmc > 3 pow > 1 tou < 10 cmd < r \
                     name = \"Niv-Mizzet, the Firemind\" oracle != discard |cmd| >= 2 draw";
        let clauses = generate_ast(query);
        let written = crate::to_query_string(&clauses);
        assert_eq!(generate_ast(&written), clauses, "rewritten as: {written}");
    }

    #[test]
    fn keyword_valued_text_round_trips() {
        for query in [
            "oracle = cmc draw",
            "oracle = similar to x",
            "oracle != t:elf",
            "oracle = > draw",
            "name = GT",
            "t EQ TO",
            "t GT",
            "cmc >",
            "\"cmd\" r",
            "similar TO EQUAL Elenda",
        ] {
            let clauses = generate_ast(query);
            let written = crate::to_query_string(&clauses);
            assert_eq!(generate_ast(&written), clauses, "{query} rewritten as: {written}");
        }
    }

    #[test]
    fn written_keyword_text_keeps_its_clause() {
        let clauses = generate_ast("oracle = cmc draw");
        assert_eq!(clauses, vec![free("cmc"), free("draw")]);
        assert_eq!(crate::to_query_string(&clauses), "oracle = cmc draw");
    }

    #[test]
    fn performance_many_queries() {
        let queries = [
            "sim Elenda",
            "cmd TO NOT EQUAL rg",
            "t:creature set = znr cmc > 3 pow > 1 tou < 10",
            "name = \"Niv-Mizzet, the Firemind\" draw discard",
            "|color| < 2 |cmd| = 2 |type| > 2",
        ];

        let start = Instant::now();
        for _ in 0..1000 {
            for query in &queries {
                let _ = generate_ast(query);
            }
        }
        let elapsed = start.elapsed();

        assert!(
            elapsed.as_millis() < 2000,
            "Parsing 5,000 queries took {elapsed:?}, expected < 2s"
        );
    }
}
