//! new command - Create a commit from a tree

use anyhow::{bail, Context as _, Result};
use serde_json::json;

use super::Session;
use crate::cli::Context;
use crate::core::person::Person;
use crate::core::types::RefName;
use crate::object::Commit;
use crate::ui::output;

/// Create a commit for `tree` with the given parents and message.
///
/// Author and committer are both the configured identity, stamped with
/// the current time.
pub fn create(
    ctx: &Context,
    tree: &str,
    parents: &[String],
    message: &str,
    update_ref: Option<&str>,
) -> Result<()> {
    let refname = update_ref
        .map(RefName::new)
        .transpose()
        .context("invalid --update-ref")?;

    let session = Session::open(ctx)?;
    let git = session.owner.git();

    let tree_id = git
        .resolve(tree)
        .with_context(|| format!("cannot resolve tree '{}'", tree))?;
    let parent_ids = parents
        .iter()
        .map(|p| {
            git.resolve_commit(p)
                .with_context(|| format!("cannot resolve parent '{}'", p))
        })
        .collect::<Result<Vec<_>>>()?;

    let person = identity(&session)?;
    output::debug(format!("identity: {}", person), ctx.verbosity);

    let mut commit = Commit::with_parents(&session.owner, &parent_ids)?;
    commit.set_message(message);
    commit
        .set_tree_id(&tree_id)
        .with_context(|| format!("'{}' is not a tree", tree))?;
    commit.set_author(&person);
    commit.set_committer(&person);

    let expected_old = match &refname {
        Some(r) => git.try_resolve_ref(r)?,
        None => None,
    };

    let new_id = commit.write().context("failed to write commit")?;
    output::debug(format!("wrote commit {}", new_id), ctx.verbosity);

    if let Some(r) = &refname {
        git.update_ref_cas(r, &new_id, expected_old.as_ref(), "cbr: new")
            .with_context(|| format!("failed to update {}", r))?;
    }

    if session.json(ctx) {
        output::json(&json!({
            "id": new_id,
            "ref": refname,
        }));
    } else {
        output::print(&new_id, ctx.verbosity);
    }
    Ok(())
}

/// Configured identity, falling back to git's `user.name`/`user.email`.
fn identity(session: &Session) -> Result<Person> {
    let fallback = session.owner.git().default_person()?;

    let name = session
        .config
        .identity_name()
        .map(str::to_string)
        .or_else(|| fallback.as_ref().map(|p| p.name().to_string()));
    let email = session
        .config
        .identity_email()
        .map(str::to_string)
        .or_else(|| fallback.as_ref().map(|p| p.email().to_string()));

    let (Some(name), Some(email)) = (name, email) else {
        bail!("no identity configured; set [identity] in the cbr config or git's user.name/user.email");
    };

    let now = u64::try_from(chrono::Utc::now().timestamp())
        .context("system clock is before the Unix epoch")?;
    Ok(Person::new(name, email, now))
}
