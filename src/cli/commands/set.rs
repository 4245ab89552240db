//! set command - Edit commit fields and write the result
//!
//! # Assignments
//!
//! Each assignment is `FIELD=VALUE`. `VALUE` is parsed as JSON so that
//! people can be given as objects (`{"name":..,"email":..,"time":..}`);
//! anything that is not valid JSON is taken as a plain string. Each field
//! is routed through the `FIELD=` entry of the commit method table, so
//! read-only fields are rejected the same way a dynamic caller would see.

use anyhow::{anyhow, bail, Context as _, Result};
use serde_json::json;

use super::Session;
use crate::bridge::{dispatch, Value};
use crate::cli::Context;
use crate::core::types::RefName;
use crate::ui::output;

/// Split `FIELD=VALUE` into the setter method name and its argument.
///
/// ```
/// use commitbridge::cli::commands::parse_assignment;
///
/// let (method, value) = parse_assignment("message=hello world").unwrap();
/// assert_eq!(method, "message=");
/// assert_eq!(value.expect_str().unwrap(), "hello world");
/// ```
pub fn parse_assignment(text: &str) -> Result<(String, Value)> {
    let (field, raw) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{}'", text))?;
    if field.is_empty() {
        bail!("missing field name in '{}'", text);
    }

    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(raw),
    };
    Ok((format!("{}=", field), value))
}

/// Apply assignments to the commit at `rev`, write it, and optionally
/// move a ref to the result.
pub fn set(
    ctx: &Context,
    rev: &str,
    assignments: &[String],
    update_ref: Option<&str>,
) -> Result<()> {
    let parsed = assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<Result<Vec<_>>>()?;
    let refname = update_ref
        .map(RefName::new)
        .transpose()
        .context("invalid --update-ref")?;

    let session = Session::open(ctx)?;
    let git = session.owner.git();
    let expected_old = match &refname {
        Some(r) => git.try_resolve_ref(r)?,
        None => None,
    };

    let mut commit = session.commit(ctx, rev)?;
    for (method, value) in &parsed {
        dispatch(&mut commit, method, std::slice::from_ref(value))
            .with_context(|| format!("cannot set '{}'", method.trim_end_matches('=')))?;
        output::debug(format!("applied {}", method), ctx.verbosity);
    }

    let new_id = commit.write().context("failed to write commit")?;
    output::debug(format!("wrote commit {}", new_id), ctx.verbosity);

    if let Some(r) = &refname {
        git.update_ref_cas(r, &new_id, expected_old.as_ref(), "cbr: set")
            .with_context(|| format!("failed to update {}", r))?;
        output::debug(format!("moved {} to {}", r, new_id), ctx.verbosity);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_values_parsed() {
        let (method, value) =
            parse_assignment(r#"author={"name":"A","email":"a@x.com","time":1000}"#).unwrap();
        assert_eq!(method, "author=");
        assert_eq!(value.expect_person().unwrap().name(), "A");
    }

    #[test]
    fn quoted_json_string() {
        let (_, value) = parse_assignment(r#"message="42""#).unwrap();
        assert_eq!(value.expect_str().unwrap(), "42");
    }

    #[test]
    fn value_may_contain_equals() {
        let (method, value) = parse_assignment("message=a=b").unwrap();
        assert_eq!(method, "message=");
        assert_eq!(value.expect_str().unwrap(), "a=b");
    }

    #[test]
    fn malformed_assignments_rejected() {
        assert!(parse_assignment("message").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
