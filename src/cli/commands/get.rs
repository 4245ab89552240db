//! get command - Read one field through the commit method table

use anyhow::{bail, Context as _, Result};

use super::{format_value, Session};
use crate::bridge::{dispatch, lookup_method, Access};
use crate::cli::Context;
use crate::ui::output;

/// Invoke a reader method and print its value.
///
/// Only read-only methods are allowed; `write` and setters go through
/// `cbr set`.
pub fn get(ctx: &Context, rev: &str, field: &str) -> Result<()> {
    if let Some(def) = lookup_method(field) {
        if def.access != Access::Read {
            bail!("'{}' is not a reader; use `cbr set`", field);
        }
    }

    let session = Session::open(ctx)?;
    let mut commit = session.commit(ctx, rev)?;

    let value = dispatch(&mut commit, field, &[])
        .with_context(|| format!("cannot read '{}' of {}", field, rev))?;

    if session.json(ctx) {
        output::json(&value.to_json());
    } else {
        output::print(format_value(&value), ctx.verbosity);
    }
    Ok(())
}
