//! change-uuid binary
//!
//! Installed as `.git/hooks/commit-msg`; git passes the message file path.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use change_uuid::tooling::cli::{Cli, CliContext, ABOUT};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.about {
        println!("{}", ABOUT);
        return Ok(());
    }
    let Some(messagefile) = cli.messagefile.as_deref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let context = CliContext::new(&cli).context("Failed to load configuration")?;
    context.init_logging()?;

    let outcome = context.execute(messagefile)?;
    tracing::debug!(?outcome, "Hook finished");
    Ok(())
}
