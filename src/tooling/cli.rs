//! CLI Tooling
//!
//! Command-line surface of the `commit-msg` hook. Git invokes the binary with the path of
//! the message file as its only argument.

use crate::config::{ChangeUuidConfig, ConfigLoader};
use crate::error::ApiError;
use crate::hook::{Hook, HookOutcome};
use crate::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;

/// Text printed by `--about`, used by hook managers to describe the hook
pub const ABOUT: &str = "Add uuid to git commit message";

const LONG_ABOUT: &str = "\
When installed as git hook this adds a line with a random UUID at the end of the commit \
message.

Commits which are done in the last 10 minutes and have the same message share the same UUID.";

/// change-uuid - tag commit messages with a reusable Change-UUID trailer
#[derive(Debug, Parser)]
#[command(name = "change-uuid")]
#[command(about = ABOUT, long_about = LONG_ABOUT, version)]
pub struct Cli {
    /// File holding the commit message
    pub messagefile: Option<PathBuf>,

    /// Print a one-line description of the hook and exit
    #[arg(long)]
    pub about: bool,

    /// Print out additional (debug) info
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path (layered over the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Binding store directory (default: ~/.git_hooks/_data/change_uuid)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line flags on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut ChangeUuidConfig) {
        if let Some(dir) = &self.store_dir {
            config.store.path = Some(dir.clone());
        }
        apply_logging_overrides(self, &mut config.logging);
    }
}

fn apply_logging_overrides(cli: &Cli, logging: &mut LoggingConfig) {
    if cli.verbose {
        logging.level = "info".to_string();
    }
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        logging.file = Some(file.clone());
    }
}

/// Resolved invocation context: configuration with CLI overrides applied
pub struct CliContext {
    config: ChangeUuidConfig,
}

impl CliContext {
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        cli.apply_overrides(&mut config);
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_config(config: ChangeUuidConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChangeUuidConfig {
        &self.config
    }

    pub fn init_logging(&self) -> Result<(), ApiError> {
        init_logging(Some(&self.config.logging))
    }

    /// Run the hook against one message file
    pub fn execute(&self, messagefile: &std::path::Path) -> Result<HookOutcome, ApiError> {
        let mut hook = Hook::from_config(&self.config)?;
        hook.run(messagefile)
    }
}
