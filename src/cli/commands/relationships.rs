//! parents command - List the parents of a commit

use anyhow::Result;
use serde_json::json;

use super::Session;
use crate::cli::Context;
use crate::ui::output;

/// Print each parent with its summary line, in parent order.
pub fn parents(ctx: &Context, rev: &str) -> Result<()> {
    let session = Session::open(ctx)?;
    let commit = session.commit(ctx, rev)?;
    let short_len = session.config.short_id_len();

    let rows: Vec<(String, String)> = commit
        .parents()?
        .iter()
        .map(|parent| {
            let summary = parent
                .as_commit()
                .map(|c| c.message_short())
                .unwrap_or_default();
            (output::format_id(parent.id(), usize::MAX), summary)
        })
        .collect();

    if session.json(ctx) {
        let items: Vec<_> = rows
            .iter()
            .map(|(id, summary)| json!({"id": id, "message_short": summary}))
            .collect();
        output::json(&serde_json::Value::Array(items));
        return Ok(());
    }

    if rows.is_empty() {
        output::print("(root commit)", ctx.verbosity);
    }
    for (id, summary) in &rows {
        let end = short_len.min(id.len());
        output::print(format!("{} {}", &id[..end], summary), ctx.verbosity);
    }
    Ok(())
}
