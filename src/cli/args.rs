//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cbr - read and edit git commit objects
#[derive(Parser, Debug)]
#[command(name = "cbr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if cbr was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every field of a commit
    #[command(
        name = "show",
        after_help = "\
EXAMPLES:
    cbr show
    cbr show main~2
    cbr show --json HEAD"
    )]
    Show {
        /// Revision to show
        #[arg(default_value = "HEAD")]
        rev: String,
    },

    /// Read one field through the commit method table
    #[command(
        name = "get",
        after_help = "\
EXAMPLES:
    cbr get HEAD message_short
    cbr get HEAD author --json

Run `cbr methods` for the list of fields."
    )]
    Get {
        /// Revision of the commit
        rev: String,

        /// Method name (e.g. message, author, tree, parents)
        field: String,
    },

    /// Set fields on a commit and write the result as a new commit
    #[command(
        name = "set",
        long_about = "Set fields on a commit and write the result as a new commit.\n\n\
            Each assignment is FIELD=VALUE. VALUE is parsed as JSON; if it is not \
            valid JSON it is taken as a plain string. The original commit is left \
            untouched and the id of the new commit is printed.",
        after_help = "\
EXAMPLES:
    cbr set HEAD message='Reworded subject'
    cbr set HEAD 'author={\"name\":\"A\",\"email\":\"a@x.com\",\"time\":1000}'
    cbr set HEAD tree=4b825dc642cb6eb9a060e54bf8d69288fbee4904 --update-ref HEAD"
    )]
    Set {
        /// Revision of the commit to edit
        rev: String,

        /// Assignments of the form FIELD=VALUE
        #[arg(required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,

        /// Move this ref to the new commit (fails if it moved meanwhile)
        #[arg(long, value_name = "REF")]
        update_ref: Option<String>,
    },

    /// Create a new commit from a tree
    #[command(
        name = "new",
        after_help = "\
EXAMPLES:
    cbr new --tree HEAD^{tree} --parent HEAD -m 'Snapshot'
    cbr new --tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904 -m 'Empty root'"
    )]
    New {
        /// Tree for the commit (any revision naming a tree)
        #[arg(long)]
        tree: String,

        /// Parent commit; repeat for merges
        #[arg(long = "parent", value_name = "REV")]
        parents: Vec<String>,

        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Move this ref to the new commit (fails if it moved meanwhile)
        #[arg(long, value_name = "REF")]
        update_ref: Option<String>,
    },

    /// List the parents of a commit
    #[command(name = "parents")]
    Parents {
        /// Revision of the commit
        #[arg(default_value = "HEAD")]
        rev: String,
    },

    /// List the tree of a commit
    #[command(name = "tree")]
    Tree {
        /// Revision of the commit
        #[arg(default_value = "HEAD")]
        rev: String,
    },

    /// List the methods a commit responds to
    #[command(name = "methods")]
    Methods,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_defaults_to_head() {
        let cli = Cli::try_parse_from(["cbr", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Show { rev } if rev == "HEAD"));
    }

    #[test]
    fn set_requires_assignment() {
        assert!(Cli::try_parse_from(["cbr", "set", "HEAD"]).is_err());
        let cli = Cli::try_parse_from(["cbr", "set", "HEAD", "message=x", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn new_collects_parents() {
        let cli = Cli::try_parse_from([
            "cbr", "new", "--tree", "t", "--parent", "a", "--parent", "b", "-m", "msg",
        ])
        .unwrap();
        match cli.command {
            Command::New { parents, .. } => assert_eq!(parents, vec!["a", "b"]),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
