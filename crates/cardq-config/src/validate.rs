//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for aliases that will not behave
//! the way their author probably expects.

use std::fmt;

use cardq_query::{ClauseType, Operator, builtin_prefix};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// An alias is also a built-in keyword, so the built-in meaning always wins.
    AliasShadowsBuiltin {
        /// The alias keyword.
        keyword: String,
        /// Clause type the alias was meant to open.
        alias: ClauseType,
        /// Clause type the built-in keyword opens.
        builtin: ClauseType,
    },
    /// An alias is also an operator keyword, so it cannot follow another prefix.
    AliasIsOperator {
        /// The alias keyword.
        keyword: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AliasShadowsBuiltin {
                keyword,
                alias,
                builtin,
            } => {
                write!(
                    f,
                    "alias '{keyword}' for {alias} is ignored: it is a built-in keyword for {builtin}"
                )
            }
            Self::AliasIsOperator { keyword } => {
                write!(f, "alias '{keyword}' is also an operator keyword")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    for (keyword, alias) in config.dialect.aliases() {
        if let Some(builtin) = builtin_prefix(keyword) {
            warnings.push(ConfigWarning::AliasShadowsBuiltin {
                keyword: keyword.to_string(),
                alias,
                builtin,
            });
        }
        if keyword.parse::<Operator>().is_ok() {
            warnings.push(ConfigWarning::AliasIsOperator {
                keyword: keyword.to_string(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use cardq_query::Dialect;

    use super::*;

    fn config_with(dialect: Dialect) -> Config {
        Config {
            dialect,
            ..Config::default()
        }
    }

    #[test]
    fn test_no_aliases_no_warnings() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_plain_alias_no_warnings() {
        let config = config_with(Dialect::new().with_alias("edh", ClauseType::CommanderIdentity));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_alias_shadows_builtin() {
        let config = config_with(Dialect::new().with_alias("T", ClauseType::Name));
        let warnings = validate_config(&config);

        assert_eq!(
            warnings,
            vec![ConfigWarning::AliasShadowsBuiltin {
                keyword: "t".into(),
                alias: ClauseType::Name,
                builtin: ClauseType::Type,
            }]
        );
        assert!(warnings[0].to_string().contains("type-query"));
    }

    #[test]
    fn test_alias_is_operator() {
        let config = config_with(Dialect::new().with_alias("gte", ClauseType::Power));
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::AliasIsOperator {
                keyword: "gte".into()
            }]
        );
    }
}
