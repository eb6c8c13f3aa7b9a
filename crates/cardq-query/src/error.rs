//! Error types for the query crate.
//!
//! Parsing a query never fails; these errors come from converting identifiers
//! (clause types, operators, colors) supplied by callers such as the
//! configuration layer.

use thiserror::Error;

use crate::ast::ClauseType;

/// An identifier that does not name a known query element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The string is not a clause type id.
    #[error("unknown clause type: {0}")]
    UnknownClauseType(String),

    /// The string is not an accepted operator spelling.
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// The string is neither a color letter nor a color name.
    #[error("unknown color: {0}")]
    UnknownColor(String),
}

impl QueryError {
    /// Returns a hint listing the accepted values, if there is a useful one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownClauseType(_) => {
                let ids: Vec<&str> = ClauseType::ALL.iter().map(|t| t.id()).collect();
                Some(format!("valid clause types are: {}", ids.join(", ")))
            }
            Self::UnknownOperator(_) => {
                Some("valid operators are: >=, >, =, !=, <=, <, GTE, GT, EQ, NEQ, LTE, LT".into())
            }
            Self::UnknownColor(_) => {
                Some("use w, u, b, r, g or white, blue, black, red, green".into())
            }
        }
    }
}
