//! Error types for cardq configuration.

use std::{io, path::PathBuf};

use cardq_query::QueryError;
use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// An `[aliases]` key is not a clause type id.
    #[error("unknown clause type '{name}' in {path}")]
    UnknownClauseType {
        /// The key as written.
        name: String,
        /// File that defines the alias.
        path: PathBuf,
        /// Underlying lookup error.
        source: QueryError,
    },

    /// An alias keyword cannot appear as a single bare word in a query.
    #[error("invalid alias '{keyword}' in {path}: aliases must be single unquoted words")]
    InvalidAlias {
        /// The keyword as written.
        keyword: String,
        /// File that defines the alias.
        path: PathBuf,
    },
}

impl ConfigError {
    /// Returns a hint for fixing the error, if there is one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownClauseType { source, .. } => source.suggestion(),
            Self::InvalidAlias { .. } => {
                Some("remove whitespace, quotes and operator symbols from the keyword".into())
            }
            _ => None,
        }
    }
}
