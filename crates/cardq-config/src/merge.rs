//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving alias targets to clause types.

use std::path::{Path, PathBuf};

use cardq_query::{ClauseType, Dialect};
use log::debug;

use crate::{
    Config, ConfigError, OutputSettings,
    parse::{RawConfig, RawOutputSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Aliases: merged by keyword, first definition wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let output = merge_output_settings(configs);
    let dialect = merge_aliases(configs)?;
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        output,
        dialect,
        config_root,
    })
}

/// Merges output settings, taking first defined value for each field.
fn merge_output_settings(configs: &[ParsedConfig]) -> OutputSettings {
    let mut result = OutputSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref output) = parsed.config.output {
            apply_raw_output(&mut result, output);
        }
    }

    result
}

/// Applies raw output settings to result, overwriting any present values.
fn apply_raw_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.format {
        result.format = v;
    }
    if let Some(v) = raw.compact {
        result.compact = v;
    }
}

/// Merges aliases from all files into one dialect.
fn merge_aliases(configs: &[ParsedConfig]) -> Result<Dialect, ConfigError> {
    let mut dialect = Dialect::new();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let Some(ref aliases) = parsed.config.aliases else {
            continue;
        };

        for (name, keywords) in aliases {
            let clause_type: ClauseType =
                name.parse().map_err(|source| ConfigError::UnknownClauseType {
                    name: name.clone(),
                    path: parsed.path.clone(),
                    source,
                })?;

            for keyword in keywords {
                if !is_valid_alias(keyword) {
                    return Err(ConfigError::InvalidAlias {
                        keyword: keyword.clone(),
                        path: parsed.path.clone(),
                    });
                }
                if let Some(previous) = dialect.insert(keyword, clause_type)
                    && previous != clause_type
                {
                    debug!(
                        "alias '{keyword}' in {} overrides {previous} with {clause_type}",
                        parsed.path.display()
                    );
                }
            }
        }
    }

    Ok(dialect)
}

/// Returns true if `keyword` can be written as a single bare word that opens a clause.
///
/// Quotes would make the word literal text, and operator symbols would split it into a
/// prefix and a glued value.
fn is_valid_alias(keyword: &str) -> bool {
    !keyword.is_empty()
        && !keyword
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | ':' | '<' | '>' | '=' | '!'))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::OutputFormat;

    fn parsed(path: &str, config: RawConfig) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config,
        }
    }

    fn with_aliases(entries: &[(&str, &[&str])]) -> RawConfig {
        let aliases: BTreeMap<String, Vec<String>> = entries
            .iter()
            .map(|(name, keywords)| {
                (
                    name.to_string(),
                    keywords.iter().map(|k| k.to_string()).collect(),
                )
            })
            .collect();
        RawConfig {
            aliases: Some(aliases),
            ..RawConfig::default()
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.dialect.is_empty());
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_merge_output_precedence() {
        let local = RawConfig {
            output: Some(RawOutputSettings {
                format: Some(OutputFormat::Json),
                compact: None,
            }),
            ..RawConfig::default()
        };
        let global = RawConfig {
            output: Some(RawOutputSettings {
                format: Some(OutputFormat::Tree),
                compact: Some(true),
            }),
            ..RawConfig::default()
        };

        let config = merge_configs(&[
            parsed("/project/.cardq.toml", local),
            parsed("/home/user/.cardq.toml", global),
        ])
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.compact);
        assert_eq!(config.config_root, Some(PathBuf::from("/project")));
    }

    #[test]
    fn test_merge_aliases_closest_wins() {
        let local = with_aliases(&[("name-query", &["card"])]);
        let global = with_aliases(&[
            ("similarity-query", &["card", "like"]),
            ("commander-identity-query", &["edh"]),
        ]);

        let config = merge_configs(&[
            parsed("/project/.cardq.toml", local),
            parsed("/home/user/.cardq.toml", global),
        ])
        .unwrap();

        assert_eq!(config.dialect.get("card"), Some(ClauseType::Name));
        assert_eq!(config.dialect.get("like"), Some(ClauseType::Similarity));
        assert_eq!(
            config.dialect.get("edh"),
            Some(ClauseType::CommanderIdentity)
        );
    }

    #[test]
    fn test_merge_unknown_clause_type() {
        let config = with_aliases(&[("mana-query", &["mana"])]);
        let err = merge_configs(&[parsed("/project/.cardq.toml", config)]).unwrap_err();

        assert!(matches!(err, ConfigError::UnknownClauseType { ref name, .. } if name == "mana-query"));
        assert!(err.suggestion().unwrap().contains("name-query"));
    }

    #[test]
    fn test_merge_invalid_alias() {
        for keyword in ["", "two words", "a:b", "x>", "\"q\""] {
            let config = with_aliases(&[("name-query", &[keyword])]);
            let err = merge_configs(&[parsed("/project/.cardq.toml", config)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidAlias { .. }),
                "accepted {keyword:?}"
            );
        }
    }
}
