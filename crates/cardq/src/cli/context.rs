//! Per-invocation state handed to every command.

use std::{env, path::PathBuf, process::ExitCode};

use cardq_config::Config;

/// How much configuration a command needs before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    /// Discover and merge every `.cardq.toml`; a broken file aborts the command.
    Merged,
    /// Use defaults. `init` and `check` read (or replace) config files themselves.
    Defaults,
}

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Directory discovery starts from and `init` writes into.
    pub cwd: PathBuf,
    /// Output defaults and the alias dialect the parser reads with.
    pub config: Config,
}

impl CommandContext {
    /// Resolves the working directory and, for [`ConfigMode::Merged`], the config.
    ///
    /// Failures are reported on stderr and returned as the exit code to use.
    pub fn load(mode: ConfigMode) -> Result<Self, ExitCode> {
        let cwd = env::current_dir().map_err(|e| {
            eprintln!("error: could not determine current directory: {e}");
            ExitCode::FAILURE
        })?;

        let config = match mode {
            ConfigMode::Defaults => Config::default(),
            ConfigMode::Merged => Config::load(&cwd).map_err(|e| {
                eprintln!("error: failed to load configuration: {e}");
                if let Some(hint) = e.suggestion() {
                    eprintln!("hint: {hint}");
                }
                ExitCode::FAILURE
            })?,
        };

        Ok(Self { cwd, config })
    }
}
