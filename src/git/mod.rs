//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to libgit2. All object reads and
//! writes flow through this interface. No other module should import
//! `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery, opening and creation
//! - Object lookup with kind checks
//! - Commit records: load, edit in memory, write
//! - Tree, blob and tag reads (plus blob/tree writes for building commits)
//! - Ref resolution and CAS updates
//!
//! # Invariants
//!
//! - No other module calls git2 directly
//! - No git2 object outlives the call that produced it; fields are copied
//! - All operations return strong types (Oid, ObjectKind, Person)
//!
//! # Example
//!
//! ```ignore
//! use commitbridge::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.resolve_commit("HEAD")?;
//!
//! let mut record = git.read_commit(&head)?;
//! record.set_message("reworded\n");
//! let new_id = git.write_commit(&record)?;
//! ```

mod interface;
mod record;

pub use interface::{Git, GitError, TagInfo, TreeEntry};
pub use record::{summarize, CommitRecord};
