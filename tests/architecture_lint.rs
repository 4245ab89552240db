//! Architecture enforcement tests.
//!
//! The crate keeps libgit2 behind a single doorway (`src/git/`) and never
//! binds setters for derived or read-only commit fields. These tests scan
//! the source tree so violations are caught in CI.
//!
//! # Test Categories
//!
//! 1. **libgit2 Containment** - Only `src/git/` may name `git2`
//! 2. **Read-only Fields** - No typed setter for `message_short`, `time`, `parents`
//! 3. **Panic Freedom** - No `unwrap()`/`expect(` outside test modules

use std::fs;
use std::path::{Path, PathBuf};

/// Directory allowed to use the `git2` crate.
const GIT_DOORWAY: &str = "src/git";

/// Commit fields that must never get a setter.
const READ_ONLY_FIELDS: &[&str] = &["message_short", "time", "parents"];

/// Collect every `.rs` file under `dir`.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read source directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Source text before the first `#[cfg(test)]` module.
fn non_test_source(content: &str) -> &str {
    match content.find("#[cfg(test)]") {
        Some(idx) => &content[..idx],
        None => content,
    }
}

/// Drop `//` comments, including doc comments and doctests.
fn strip_comments(source: &str) -> String {
    source
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// libgit2 Containment
// =============================================================================

#[test]
fn only_git_module_uses_git2() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        if path.starts_with(GIT_DOORWAY) {
            continue;
        }
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
        let code = strip_comments(&content);

        if code.contains("git2::") || code.contains("use git2") {
            violations.push(format!(
                "{}: uses git2 directly - go through crate::git::Git",
                path.display()
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Architecture violations found:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn git_doorway_exists() {
    let files = rust_files(Path::new(GIT_DOORWAY));
    let uses_git2 = files.iter().any(|path| {
        fs::read_to_string(path)
            .map(|c| c.contains("git2::"))
            .unwrap_or(false)
    });
    assert!(uses_git2, "{} must contain the libgit2 interface", GIT_DOORWAY);
}

// =============================================================================
// Read-only Fields
// =============================================================================

#[test]
fn read_only_fields_have_no_typed_setter() {
    let content = fs::read_to_string("src/object/commit.rs").expect("Failed to read commit.rs");
    let code = strip_comments(non_test_source(&content));

    for field in READ_ONLY_FIELDS {
        let setter = format!("fn set_{}(", field);
        assert!(
            !code.contains(&setter),
            "Commit must not define {} - the field is read-only",
            setter
        );
    }
}

#[test]
fn read_only_fields_have_no_dynamic_binding() {
    let content = fs::read_to_string("src/bridge/methods.rs").expect("Failed to read methods.rs");
    let code = non_test_source(&content);

    for field in READ_ONLY_FIELDS {
        let binding = format!("def(\"{}=\"", field);
        assert!(
            !code.contains(&binding),
            "method table must not bind {}=",
            field
        );
    }
}

// =============================================================================
// Panic Freedom
// =============================================================================

#[test]
fn library_code_does_not_unwrap() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
        for (lineno, line) in non_test_source(&content).lines().enumerate() {
            if line.trim_start().starts_with("//") {
                continue;
            }
            if line.contains(".unwrap()") || line.contains(".expect(") {
                violations.push(format!("{}:{}: {}", path.display(), lineno + 1, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "unwrap/expect in library code:\n  {}",
        violations.join("\n  ")
    );
}
