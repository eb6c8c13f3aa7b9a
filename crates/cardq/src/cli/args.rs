//! Clap argument definitions for the `cardq` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

use super::context::ConfigMode;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "cardq")]
#[command(about = "Parse card search queries into typed clauses")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `cardq parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query words, joined with single spaces
    #[arg(required = true, allow_hyphen_values = true)]
    pub query: Vec<String>,

    /// Output the clauses as JSON
    #[arg(long, conflicts_with = "tree")]
    pub json: bool,

    /// Output the clauses as an indented tree
    #[arg(long)]
    pub tree: bool,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `cardq tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query words, joined with single spaces
    #[arg(required = true, allow_hyphen_values = true)]
    pub query: Vec<String>,

    /// Output the tokens as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `cardq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.cardq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `cardq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and print its clauses
    #[command(after_help = "\
QUERY SYNTAX:
  t:creature        Type contains \"creature\"
  cmc > 3           Mana value greater than 3
  cmd < rg          Commander identity within red and green
  |color| = 2       Exactly two colors
  name = \"Opt\"      Exact name match
  sim Elenda        Cards similar to Elenda
  draw              Free text in the rules text

OPERATORS:
  >= > = != <= < :  Symbols (: means =)
  GTE GT EQ NEQ LTE LT
  EQUALS, TO EQUAL, NOT EQUALS, TO NOT EQUAL")]
    Parse(ParseCommand),

    /// Show how a query is split into tokens
    Tokens(TokensCommand),

    /// Initialize cardq configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

impl Commands {
    /// Returns how much configuration the command needs loaded up front.
    ///
    /// `init` and `check` must run even when an existing config file is invalid.
    pub fn config_mode(&self) -> ConfigMode {
        match self {
            Self::Init(_) | Self::Check => ConfigMode::Defaults,
            Self::Parse(_) | Self::Tokens(_) | Self::Config => ConfigMode::Merged,
        }
    }
}
