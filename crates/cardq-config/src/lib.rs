//! Configuration system for cardq.
//!
//! cardq uses TOML configuration files named `.cardq.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.cardq.toml` files found, then loading `~/.cardq.toml` as the global config with lowest
//! precedence.
//!
//! Besides output preferences, a config file can define prefix aliases: extra keywords that
//! open a clause of a given type, layered over the built-in keywords as a [`Dialect`].

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use cardq_query::Dialect;
pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawOutputSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for cardq.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.cardq.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Output settings.
    pub output: OutputSettings,
    /// Prefix aliases from all config files.
    pub dialect: Dialect,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.cardq.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for aliases that collide with built-in prefix keywords or with
    /// operator keywords.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.cardq.toml` file, with aliases grouped by
    /// clause type.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let mut aliases: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (keyword, clause_type) in self.dialect.aliases() {
            aliases
                .entry(clause_type.id().to_string())
                .or_default()
                .push(keyword.to_string());
        }

        let serializable = SerializableSettings {
            output: self.output.clone(),
            aliases,
        };
        toml::to_string_pretty(&serializable)
    }
}

/// How `cardq parse` prints clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One indented block per clause.
    #[default]
    Tree,
    /// The clause list as JSON.
    Json,
}

/// Output settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// How `cardq parse` prints clauses.
    pub format: OutputFormat,
    /// Print JSON on a single line.
    pub compact: bool,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Output settings.
    output: OutputSettings,
    /// Clause type id -> alias keywords, sorted for deterministic output.
    aliases: BTreeMap<String, Vec<String>>,
}
