//! Clause abstract syntax tree.
//!
//! A parsed query is a flat, ordered list of [`Clause`]s. Each clause pairs a
//! [`ClauseType`] with a canonical [`Operator`] and a typed [`Value`]. The
//! serialized form of these types is the contract consumed by the filtering
//! engine, so field and tag names follow the wire identifiers exactly.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer, ser::SerializeSeq};

use crate::{error::QueryError, parser::generate_ast, table};

/// Wire id of commander identity clauses.
pub const COMMANDER_IDENTITY_QUERY_ID: &str = "commander-identity-query";
/// Wire id of card color clauses.
pub const COLOR_QUERY_ID: &str = "color-query";
/// Wire id of set code clauses.
pub const SET_QUERY_ID: &str = "set-query";
/// Wire id of set name clauses.
pub const SET_NAME_QUERY_ID: &str = "set-name-query";
/// Wire id of card name clauses.
pub const NAME_QUERY_ID: &str = "name-query";
/// Wire id of type line clauses.
pub const TYPE_QUERY_ID: &str = "type-query";
/// Wire id of rules text clauses, also used for free text.
pub const TEXT_QUERY_ID: &str = "text-query";
/// Wire id of similarity clauses.
pub const SIMILARITY_QUERY_ID: &str = "similarity-query";
/// Wire id of converted mana cost clauses.
pub const CONVERTED_MANACOST_QUERY_ID: &str = "converted-manacost-query";
/// Wire id of power clauses.
pub const POWER_QUERY_ID: &str = "power-query";
/// Wire id of toughness clauses.
pub const TOUGHNESS_QUERY_ID: &str = "toughness-query";
/// Wire id of `|color|` clauses.
pub const NUMBER_OF_COLORS_QUERY_ID: &str = "number-of-colors-query";
/// Wire id of `|cmd|` clauses.
pub const NUMBER_OF_COMMANDER_IDENTITY_COLORS_QUERY_ID: &str =
    "number-of-commander-identity-colors-query";
/// Wire id of `|type|` clauses.
pub const NUMBER_OF_TYPES_QUERY_ID: &str = "number-of-types-query";

/// Wire id of integer values.
pub const NUMBER_VALUE_ID: &str = "number-value";
/// Wire id of color set values.
pub const COLOR_VALUE_ID: &str = "color-value";
/// Wire id of text values.
pub const TEXT_VALUE_ID: &str = "text-value";

/// The kind of value a clause type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A signed integer.
    Number,
    /// An ordered set of colors.
    Color,
    /// A string, optionally exact.
    Text,
}

/// The predicate kind of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClauseType {
    /// Commander color identity (`cmd`).
    CommanderIdentity,
    /// Card colors (`c`).
    Color,
    /// Set code (`set`).
    Set,
    /// Full set name (`set_name`).
    SetName,
    /// Card name (`name`).
    Name,
    /// Type line (`t`).
    Type,
    /// Rules text; the default for unprefixed words.
    Text,
    /// Cards similar to a named card (`sim`).
    Similarity,
    /// Converted mana cost (`cmc`).
    ConvertedManacost,
    /// Power (`pow`).
    Power,
    /// Toughness (`tou`).
    Toughness,
    /// Number of colors (`|color|`).
    NumberOfColors,
    /// Number of colors in the commander identity (`|cmd|`).
    NumberOfCommanderIdentityColors,
    /// Number of card types (`|type|`).
    NumberOfTypes,
}

impl ClauseType {
    /// Every clause type, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::CommanderIdentity,
        Self::Color,
        Self::Set,
        Self::SetName,
        Self::Name,
        Self::Type,
        Self::Text,
        Self::Similarity,
        Self::ConvertedManacost,
        Self::Power,
        Self::Toughness,
        Self::NumberOfColors,
        Self::NumberOfCommanderIdentityColors,
        Self::NumberOfTypes,
    ];

    /// Returns the wire identifier, e.g. `"type-query"`.
    pub fn id(self) -> &'static str {
        match self {
            Self::CommanderIdentity => COMMANDER_IDENTITY_QUERY_ID,
            Self::Color => COLOR_QUERY_ID,
            Self::Set => SET_QUERY_ID,
            Self::SetName => SET_NAME_QUERY_ID,
            Self::Name => NAME_QUERY_ID,
            Self::Type => TYPE_QUERY_ID,
            Self::Text => TEXT_QUERY_ID,
            Self::Similarity => SIMILARITY_QUERY_ID,
            Self::ConvertedManacost => CONVERTED_MANACOST_QUERY_ID,
            Self::Power => POWER_QUERY_ID,
            Self::Toughness => TOUGHNESS_QUERY_ID,
            Self::NumberOfColors => NUMBER_OF_COLORS_QUERY_ID,
            Self::NumberOfCommanderIdentityColors => NUMBER_OF_COMMANDER_IDENTITY_COLORS_QUERY_ID,
            Self::NumberOfTypes => NUMBER_OF_TYPES_QUERY_ID,
        }
    }

    /// Returns the kind of value this clause type carries.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Self::CommanderIdentity | Self::Color => ValueKind::Color,
            Self::Set
            | Self::SetName
            | Self::Name
            | Self::Type
            | Self::Text
            | Self::Similarity => ValueKind::Text,
            Self::ConvertedManacost
            | Self::Power
            | Self::Toughness
            | Self::NumberOfColors
            | Self::NumberOfCommanderIdentityColors
            | Self::NumberOfTypes => ValueKind::Number,
        }
    }

    /// Returns the keyword used when writing this clause back as a query.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::CommanderIdentity => "cmd",
            Self::Color => "color",
            Self::Set => "set",
            Self::SetName => "set_name",
            Self::Name => "name",
            Self::Type => "type",
            Self::Text => "oracle",
            Self::Similarity => "sim",
            Self::ConvertedManacost => "cmc",
            Self::Power => "pow",
            Self::Toughness => "tou",
            Self::NumberOfColors => "|color|",
            Self::NumberOfCommanderIdentityColors => "|cmd|",
            Self::NumberOfTypes => "|type|",
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ClauseType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueryError::UnknownClauseType(s.to_string()))
    }
}

impl Serialize for ClauseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// A canonical comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// Greater than or equal.
    Gte,
    /// Greater than.
    Gt,
    /// Equal; the operator of clauses that spell none.
    #[default]
    Eq,
    /// Not equal.
    Neq,
    /// Less than or equal.
    Lte,
    /// Less than.
    Lt,
}

impl Operator {
    /// Returns the canonical id, e.g. `"GTE"`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Gte => "GTE",
            Self::Gt => "GT",
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Lte => "LTE",
            Self::Lt => "LT",
        }
    }

    /// Returns the symbolic spelling, e.g. `">="`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gte => ">=",
            Self::Gt => ">",
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Lte => "<=",
            Self::Lt => "<",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Accepts any spelling the parser accepts: ids, symbols, and keyword phrases.
impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        table::OPERATORS
            .iter()
            .find(|(spelling, _)| table::spells(spelling, &words))
            .map(|&(_, op)| op)
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// One of the five colors of magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// White (`W`).
    White,
    /// Blue (`U`).
    Blue,
    /// Black (`B`).
    Black,
    /// Red (`R`).
    Red,
    /// Green (`G`).
    Green,
}

impl Color {
    /// Returns the upper-case color letter.
    pub fn letter(self) -> char {
        match self {
            Self::White => 'W',
            Self::Blue => 'U',
            Self::Black => 'B',
            Self::Red => 'R',
            Self::Green => 'G',
        }
    }

    /// Maps a color letter, in either case.
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'W' => Some(Self::White),
            'U' => Some(Self::Blue),
            'B' => Some(Self::Black),
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            _ => None,
        }
    }

    /// Maps a full color name such as `"red"`, in any case.
    pub fn from_name(name: &str) -> Option<Self> {
        table::COLOR_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Color {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_letter(ch),
            _ => None,
        };
        single
            .or_else(|| Self::from_name(s))
            .ok_or_else(|| QueryError::UnknownColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Colors in first-seen order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColorSet(Vec<Color>);

impl ColorSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a color unless already present. Returns whether it was added.
    pub fn insert(&mut self, color: Color) -> bool {
        if self.0.contains(&color) {
            return false;
        }
        self.0.push(color);
        true
    }

    /// Returns true if the set holds `color`.
    pub fn contains(&self, color: Color) -> bool {
        self.0.contains(&color)
    }

    /// Number of colors in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no color was recognized.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates colors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().copied()
    }

    /// Returns the colors as a slice.
    pub fn as_slice(&self) -> &[Color] {
        &self.0
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = Self::new();
        for color in iter {
            set.insert(color);
        }
        set
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in &self.0 {
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

impl Serialize for ColorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for color in &self.0 {
            seq.serialize_element(color)?;
        }
        seq.end()
    }
}

/// The typed value of a clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Value {
    /// An integer, for numeric clause types.
    #[serde(rename = "number-value")]
    Number {
        /// The parsed integer.
        value: i64,
    },
    /// A color set, for color clause types.
    #[serde(rename = "color-value")]
    Color {
        /// The recognized colors.
        value: ColorSet,
    },
    /// A string, for text clause types.
    #[serde(rename = "text-value")]
    Text {
        /// The token text with any quotes stripped.
        value: String,
        /// True when the text came from a quoted token.
        #[serde(rename = "isExact")]
        is_exact: bool,
    },
}

impl Value {
    /// Creates a number value.
    pub fn number(value: i64) -> Self {
        Self::Number { value }
    }

    /// Creates a color value.
    pub fn colors(value: impl IntoIterator<Item = Color>) -> Self {
        Self::Color {
            value: value.into_iter().collect(),
        }
    }

    /// Creates a text value.
    pub fn text(value: impl Into<String>, is_exact: bool) -> Self {
        Self::Text {
            value: value.into(),
            is_exact,
        }
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number { .. } => ValueKind::Number,
            Self::Color { .. } => ValueKind::Color,
            Self::Text { .. } => ValueKind::Text,
        }
    }

    /// Returns the wire identifier of this value's kind.
    pub fn type_id(&self) -> &'static str {
        match self {
            Self::Number { .. } => NUMBER_VALUE_ID,
            Self::Color { .. } => COLOR_VALUE_ID,
            Self::Text { .. } => TEXT_VALUE_ID,
        }
    }

    /// Formats the value so the parser reads it back unchanged.
    fn to_query_string(&self) -> String {
        match self {
            Self::Number { value } => value.to_string(),
            Self::Color { value } if value.is_empty() => "\"\"".to_string(),
            Self::Color { value } => value.to_string().to_ascii_lowercase(),
            Self::Text {
                value,
                is_exact: true,
            } => format!("\"{value}\""),
            Self::Text {
                value,
                is_exact: false,
            } => value.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value } => write!(f, "{NUMBER_VALUE_ID} {value}"),
            Self::Color { value } => {
                let letters: Vec<String> = value.iter().map(|c| c.to_string()).collect();
                write!(f, "{COLOR_VALUE_ID} [{}]", letters.join(", "))
            }
            Self::Text { value, is_exact } => {
                write!(f, "{TEXT_VALUE_ID} {value:?}")?;
                if *is_exact {
                    write!(f, " (exact)")?;
                }
                Ok(())
            }
        }
    }
}

/// One parsed predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
    /// The predicate kind.
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    /// The canonical operator.
    pub operator: Operator,
    /// The typed value; its kind always matches `clause_type.value_kind()`.
    pub value: Value,
}

impl Clause {
    /// Creates a clause.
    pub fn new(clause_type: ClauseType, operator: Operator, value: Value) -> Self {
        Self {
            clause_type,
            operator,
            value,
        }
    }

    /// Creates the default free-text clause for a word the parser did not recognize.
    pub fn free_text(text: impl Into<String>, is_exact: bool) -> Self {
        Self::new(ClauseType::Text, Operator::Eq, Value::text(text, is_exact))
    }

    /// Formats the clause as query text that parses back to this clause.
    ///
    /// Free-text clauses are written as bare words when the word reads back as free
    /// text; everything else, including free text spelled like a prefix or operator
    /// (`oracle = cmc`), is written as `keyword symbol value`, e.g. `cmc > 3`.
    pub fn to_query_string(&self) -> String {
        let value = self.value.to_query_string();
        if self.reads_as_bare_word() {
            return value;
        }
        format!(
            "{} {} {}",
            self.clause_type.keyword(),
            self.operator.symbol(),
            value
        )
    }

    /// True for free text whose written value parses back to exactly this clause.
    fn reads_as_bare_word(&self) -> bool {
        match &self.value {
            Value::Text { is_exact: true, .. } => self.is_free_text(),
            // A keyword alone reads back as text, but not when more words follow.
            Value::Text { value, .. } if self.is_free_text() => {
                !table::is_builtin_keyword(value)
                    && matches!(generate_ast(value).as_slice(), [only] if only == self)
            }
            _ => false,
        }
    }

    /// True for the `text-query EQ` shape unrecognized words parse to.
    fn is_free_text(&self) -> bool {
        self.clause_type == ClauseType::Text && self.operator == Operator::Eq
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.clause_type, self.operator)?;
        write!(f, "  {}", self.value)
    }
}

/// Formats a clause sequence back into a query string.
pub fn to_query_string(clauses: &[Clause]) -> String {
    clauses
        .iter()
        .map(Clause::to_query_string)
        .collect::<Vec<_>>()
        .join(" ")
}
