//! show command - Display every field of a commit

use anyhow::Result;

use super::Session;
use crate::cli::Context;
use crate::ui::output;

/// Show a commit as text or JSON.
pub fn show(ctx: &Context, rev: &str) -> Result<()> {
    let session = Session::open(ctx)?;
    let commit = session.commit(ctx, rev)?;
    let view = commit.to_view();

    if session.json(ctx) {
        output::json(&serde_json::to_value(&view)?);
    } else {
        output::print(
            output::format_commit(&view, session.config.short_id_len()),
            ctx.verbosity,
        );
    }
    Ok(())
}
