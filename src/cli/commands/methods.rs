//! methods command - List the commit method table

use anyhow::Result;
use serde_json::json;

use crate::bridge::{Access, METHODS};
use crate::cli::Context;
use crate::ui::output;

/// Print every method name with its arity and access.
pub fn methods(ctx: &Context) -> Result<()> {
    if ctx.json {
        let rows: Vec<_> = METHODS
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "arity": m.arity,
                    "read_only": m.access == Access::Read,
                })
            })
            .collect();
        output::json(&serde_json::Value::Array(rows));
        return Ok(());
    }

    for m in METHODS {
        let access = match m.access {
            Access::Read => "read",
            Access::Write => "write",
        };
        output::print(format!("{:<16} {}  {}", m.name, m.arity, access), ctx.verbosity);
    }
    Ok(())
}
