//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens a [`Session`] (repository + configuration)
//! 2. Works on commits through [`crate::object`] and [`crate::bridge`]
//! 3. Formats and displays output through [`crate::ui::output`]

mod create;
mod get;
mod methods;
mod relationships;
mod set;
mod show;
mod tree_cmd;

// Re-export command functions for testing and direct invocation
pub use create::create;
pub use get::get;
pub use methods::methods;
pub use relationships::parents;
pub use set::{parse_assignment, set};
pub use show::show;
pub use tree_cmd::tree;

use anyhow::{Context as _, Result};

use super::args::Command;
use super::Context;
use crate::bridge::Value;
use crate::core::config::Config;
use crate::object::{Commit, Owner};
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Show { rev } => show(ctx, &rev),
        Command::Get { rev, field } => get(ctx, &rev, &field),
        Command::Set {
            rev,
            assignments,
            update_ref,
        } => set(ctx, &rev, &assignments, update_ref.as_deref()),
        Command::New {
            tree,
            parents,
            message,
            update_ref,
        } => create(ctx, &tree, &parents, &message, update_ref.as_deref()),
        Command::Parents { rev } => parents(ctx, &rev),
        Command::Tree { rev } => tree(ctx, &rev),
        Command::Methods => methods(ctx),
    }
}

/// An opened repository together with its merged configuration.
pub struct Session {
    pub owner: Owner,
    pub config: Config,
}

impl Session {
    /// Open the repository at `--cwd` (or the current directory) and load
    /// configuration for it.
    pub fn open(ctx: &Context) -> Result<Self> {
        let cwd = match &ctx.cwd {
            Some(path) => path.clone(),
            None => std::env::current_dir().context("failed to get current directory")?,
        };

        let owner = Owner::open(&cwd)
            .with_context(|| format!("failed to open repository at {}", cwd.display()))?;
        output::debug(
            format!("opened repository {}", owner.git().git_dir().display()),
            ctx.verbosity,
        );

        let loaded =
            Config::load(Some(owner.git().git_dir())).context("failed to load configuration")?;
        for warning in &loaded.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                ctx.verbosity,
            );
        }
        if let Some(path) = loaded.config.repo_config_loaded_from() {
            output::debug(format!("repo config: {}", path.display()), ctx.verbosity);
        }

        Ok(Self {
            owner,
            config: loaded.config,
        })
    }

    /// Whether to print JSON: the flag, or the configured default.
    pub fn json(&self, ctx: &Context) -> bool {
        ctx.json || self.config.json()
    }

    /// Resolve `rev` and load the commit it names (tags are peeled).
    pub fn commit(&self, ctx: &Context, rev: &str) -> Result<Commit> {
        let oid = self
            .owner
            .git()
            .resolve_commit(rev)
            .with_context(|| format!("cannot resolve '{}' to a commit", rev))?;
        output::debug(format!("{} resolved to {}", rev, oid), ctx.verbosity);

        Commit::lookup(&self.owner, &oid).with_context(|| format!("failed to load commit {}", oid))
    }
}

/// Render a dynamic value for text output.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Nil => "(none)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Str(s) => s.clone(),
        Value::Person(p) => output::format_person(p),
        Value::Object(object) => format!(
            "{} {}",
            object.kind(),
            output::format_id(object.id(), usize::MAX)
        ),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Map(_) => value.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::person::Person;

    #[test]
    fn format_scalar_values() {
        assert_eq!(format_value(&Value::Nil), "(none)");
        assert_eq!(format_value(&Value::UInt(1000)), "1000");
        assert_eq!(format_value(&Value::from("msg")), "msg");
    }

    #[test]
    fn format_person_value() {
        let text = format_value(&Value::from(Person::new("A", "a@x.com", 0)));
        assert_eq!(text, "A <a@x.com> 1970-01-01 00:00:00 +0000");
    }

    #[test]
    fn format_empty_array() {
        assert_eq!(format_value(&Value::Array(Vec::new())), "");
    }
}
