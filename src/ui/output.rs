//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, results are printed as machine-readable JSON.

use std::fmt::Display;

use crate::core::person::Person;
use crate::core::types::Oid;
use crate::object::CommitView;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a JSON document. JSON is a result, so it ignores quiet mode.
pub fn json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => error(format!("failed to render JSON: {}", e)),
    }
}

/// Format a person with a readable timestamp.
///
/// ```
/// use commitbridge::core::person::Person;
/// use commitbridge::ui::output::format_person;
///
/// let p = Person::new("A", "a@x.com", 0);
/// assert_eq!(format_person(&p), "A <a@x.com> 1970-01-01 00:00:00 +0000");
/// ```
pub fn format_person(person: &Person) -> String {
    match person.datetime() {
        Some(when) => format!("{} {}", person, when.format("%Y-%m-%d %H:%M:%S %z")),
        None => format!("{} @{}", person, person.time()),
    }
}

/// Format an optional id, abbreviated to `len` characters.
pub fn format_id(id: Option<&Oid>, len: usize) -> String {
    id.map_or_else(|| "(unwritten)".to_string(), |oid| oid.short(len).to_string())
}

/// Render a commit view as `git show`-style text.
pub fn format_commit(view: &CommitView, short_len: usize) -> String {
    let mut lines = vec![format!("commit {}", format_id(view.id.as_ref(), short_len))];

    match &view.tree {
        Some(tree) => lines.push(format!("tree {}", tree.short(short_len))),
        None => lines.push("tree (none)".to_string()),
    }
    for parent in &view.parents {
        lines.push(format!("parent {}", parent.short(short_len)));
    }
    let person_line = |label: &str, person: &Option<Person>| match person {
        Some(p) => format!("{} {}", label, format_person(p)),
        None => format!("{} (none)", label),
    };
    lines.push(person_line("author", &view.author));
    lines.push(person_line("committer", &view.committer));
    lines.push(String::new());
    lines.extend(view.message.lines().map(|line| format!("    {}", line)));

    lines.join("\n")
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
