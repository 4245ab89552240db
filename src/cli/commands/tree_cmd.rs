//! tree command - List the tree of a commit, like `git ls-tree`

use anyhow::Result;
use serde_json::json;

use super::Session;
use crate::cli::Context;
use crate::ui::output;

/// Print the entries of the commit's tree.
pub fn tree(ctx: &Context, rev: &str) -> Result<()> {
    let session = Session::open(ctx)?;
    let commit = session.commit(ctx, rev)?;

    let Some(tree) = commit.tree()? else {
        output::print("(no tree)", ctx.verbosity);
        return Ok(());
    };
    let entries = match tree.as_tree() {
        Some(t) => t.entries()?,
        None => anyhow::bail!("commit tree resolved to a {}", tree.kind()),
    };

    if session.json(ctx) {
        let items: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "mode": format!("{:06o}", e.filemode),
                    "kind": e.kind,
                    "id": e.oid,
                    "name": e.name,
                })
            })
            .collect();
        output::json(&serde_json::Value::Array(items));
        return Ok(());
    }

    for e in &entries {
        output::print(
            format!("{:06o} {} {}\t{}", e.filemode, e.kind, e.oid, e.name),
            ctx.verbosity,
        );
    }
    Ok(())
}
