//! commitbridge - typed and dynamic bindings for git commit objects
//!
//! commitbridge exposes libgit2's commit object through a strongly typed
//! adapter ([`object::Commit`]) and a dynamic method table
//! ([`bridge::dispatch`]) for callers that only hold untyped values.
//! Fields (message, author, committer, tree, parents) are marshaled
//! between libgit2 and owned Rust values; storage, packing and graph
//! algorithms stay inside libgit2.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (`cbr`)
//! - [`bridge`] - Dynamic values, method table, boundary errors
//! - [`object`] - Bridged objects: Owner, Object, Commit, Tree, Blob, Tag
//! - [`core`] - Domain types, person values, configuration
//! - [`git`] - Single interface for all libgit2 operations
//! - [`ui`] - Output and debug logging
//!
//! # Correctness Invariants
//!
//! 1. Only the `git` module touches libgit2
//! 2. Nothing borrowed from libgit2 outlives the call that read it
//! 3. Arguments are kind-checked before any field is changed
//! 4. Fields without a setter have no binding, typed or dynamic

pub mod bridge;
pub mod cli;
pub mod core;
pub mod git;
pub mod object;
pub mod ui;
