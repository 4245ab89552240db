//! cli
//!
//! Command-line interface layer for commitbridge.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Open the repository and load configuration
//! - Delegate to command handlers and format their results
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers work through [`crate::object`] and
//! [`crate::bridge`]; only the `git` module talks to libgit2.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Settings shared by every command, taken from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// `--json` was given.
    pub json: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            verbosity: Verbosity::Normal,
            json: false,
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}
