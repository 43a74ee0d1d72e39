//! Tooling & Integration Layer
//!
//! The command-line entry point git calls as a `commit-msg` hook.

pub mod cli;

pub use cli::{Cli, CliContext};
