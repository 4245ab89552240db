//! object::commit
//!
//! The commit adapter.
//!
//! [`Commit`] pairs a native [`CommitRecord`] with the [`Owner`] that
//! resolves its tree and parent ids. Reads and writes go straight to the
//! record; the adapter keeps no other state.
//!
//! # Read-only fields
//!
//! `message_short`, `time` and the parent list have no setters. The time
//! comes from the committer (or author) and parents are fixed when the
//! commit is constructed. Trying to set one does not compile:
//!
//! ```compile_fail
//! use commitbridge::object::Commit;
//!
//! fn rewind(commit: &mut Commit) {
//!     commit.set_time(0);
//! }
//! ```
//!
//! ```compile_fail
//! use commitbridge::object::Commit;
//!
//! fn shorten(commit: &mut Commit) {
//!     commit.set_message_short("short");
//! }
//! ```

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::{Object, Owner};
use crate::bridge::{BridgeError, Value};
use crate::core::person::Person;
use crate::core::types::{ObjectKind, Oid};
use crate::git::{CommitRecord, GitError};

/// A commit with typed accessors.
///
/// # Example
///
/// ```ignore
/// use commitbridge::core::person::Person;
/// use commitbridge::object::{Commit, Owner};
///
/// let mut commit = Commit::new(&owner);
/// commit.set_message("initial commit");
/// commit.set_author(&Person::new("A", "a@x.com", 1000));
///
/// assert_eq!(commit.message(), "initial commit");
/// assert_eq!(commit.author(), Some(&Person::new("A", "a@x.com", 1000)));
/// assert!(commit.parents()?.is_empty());
/// assert!(commit.tree()?.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Commit {
    owner: Owner,
    record: CommitRecord,
}

impl Commit {
    // =========================================================================
    // Construction
    // =========================================================================

    /// A new, unwritten root commit with an empty message.
    pub fn new(owner: &Owner) -> Self {
        Self {
            owner: owner.clone(),
            record: CommitRecord::new(Vec::new()),
        }
    }

    /// A new, unwritten commit with a fixed parent list.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::TypeMismatch`] if a parent id names a non-commit
    pub fn with_parents(owner: &Owner, parents: &[Oid]) -> Result<Self, BridgeError> {
        for parent in parents {
            owner.expect_kind(parent, ObjectKind::Commit)?;
        }
        Ok(Self {
            owner: owner.clone(),
            record: CommitRecord::new(parents.to_vec()),
        })
    }

    /// Load the stored commit `oid`.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::NotInitialized`] if `oid` names another kind of object
    pub fn lookup(owner: &Owner, oid: &Oid) -> Result<Self, BridgeError> {
        let record = owner.git().read_commit(oid).map_err(|e| match e {
            GitError::KindMismatch { oid, actual, .. } => {
                BridgeError::NotInitialized(format!("object {} is a {}, not a commit", oid, actual))
            }
            other => other.into(),
        })?;
        Ok(Self {
            owner: owner.clone(),
            record,
        })
    }

    /// Construct from a dynamic argument list.
    ///
    /// - `[]` creates a new root commit
    /// - `[id]` (hex string or stored object) loads an existing commit
    /// - `[[parent, ...]]` creates a new commit with those parents
    ///
    /// # Errors
    ///
    /// - [`BridgeError::NotInitialized`] if the id names a non-commit
    /// - [`BridgeError::TypeMismatch`] for arguments of any other shape
    /// - [`BridgeError::Arity`] for more than one argument
    pub fn construct(owner: &Owner, args: &[Value]) -> Result<Self, BridgeError> {
        match args {
            [] => Ok(Self::new(owner)),
            [Value::Array(parents)] => {
                let ids = parents
                    .iter()
                    .map(Value::expect_oid)
                    .collect::<Result<Vec<_>, _>>()?;
                Self::with_parents(owner, &ids)
            }
            [target] => Self::lookup(owner, &target.expect_oid()?),
            _ => Err(BridgeError::Arity {
                name: "initialize".to_string(),
                expected: "0..1".to_string(),
                given: args.len(),
            }),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Id of the last stored version; `None` until first written.
    pub fn id(&self) -> Option<&Oid> {
        self.record.id()
    }

    /// True if there are edits not yet written.
    pub fn is_modified(&self) -> bool {
        self.record.is_modified()
    }

    // =========================================================================
    // Message
    // =========================================================================

    /// The full message, verbatim.
    pub fn message(&self) -> &str {
        self.record.message()
    }

    /// Replace the message.
    pub fn set_message(&mut self, message: &str) {
        self.record.set_message(message);
    }

    /// First paragraph of the message folded into one line.
    pub fn message_short(&self) -> String {
        self.record.message_short()
    }

    /// Commit timestamp in seconds since the epoch.
    pub fn time(&self) -> u64 {
        self.record.time()
    }

    // =========================================================================
    // People
    // =========================================================================

    /// The author, or `None` if not set yet.
    pub fn author(&self) -> Option<&Person> {
        self.record.author()
    }

    pub fn set_author(&mut self, author: &Person) {
        self.record.set_author(author.clone());
    }

    /// The committer, or `None` if not set yet.
    pub fn committer(&self) -> Option<&Person> {
        self.record.committer()
    }

    pub fn set_committer(&mut self, committer: &Person) {
        self.record.set_committer(committer.clone());
    }

    // =========================================================================
    // Tree
    // =========================================================================

    pub fn tree_id(&self) -> Option<&Oid> {
        self.record.tree_id()
    }

    /// The commit's tree, resolved through the owner.
    ///
    /// Returns `Ok(None)` if no tree is set.
    pub fn tree(&self) -> Result<Option<Object>, BridgeError> {
        self.record
            .tree_id()
            .map(|id| self.owner.lookup(id))
            .transpose()
    }

    /// Point the commit at `tree`.
    ///
    /// The id is resolved in this commit's own repository, whichever
    /// repository `tree` was read from.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::TypeMismatch`] if `tree` is not a tree
    pub fn set_tree(&mut self, tree: &Object) -> Result<(), BridgeError> {
        if tree.kind() != ObjectKind::Tree {
            return Err(BridgeError::type_mismatch("Tree", tree.type_name()));
        }
        let id = tree
            .id()
            .ok_or_else(|| BridgeError::NotInitialized("tree has no id".to_string()))?;
        self.set_tree_id(id)
    }

    /// Point the commit at the tree with id `id`.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::TypeMismatch`] if `id` names a non-tree
    pub fn set_tree_id(&mut self, id: &Oid) -> Result<(), BridgeError> {
        self.owner.expect_kind(id, ObjectKind::Tree)?;
        self.record.set_tree(id.clone());
        Ok(())
    }

    // =========================================================================
    // Parents
    // =========================================================================

    /// Parent ids in order. Calling this again starts over from the first.
    pub fn parent_ids(&self) -> ParentIds<'_> {
        ParentIds {
            record: &self.record,
            next: 0,
        }
    }

    /// Parent objects in order; empty for a root commit.
    pub fn parents(&self) -> Result<Vec<Object>, BridgeError> {
        self.parent_ids().map(|id| self.owner.lookup(id)).collect()
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Store the commit and return its id.
    ///
    /// An unmodified commit that is already stored is not written again.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::NotInitialized`] if tree, author or committer is unset
    pub fn write(&mut self) -> Result<Oid, BridgeError> {
        if let (false, Some(id)) = (self.record.is_modified(), self.record.id()) {
            return Ok(id.clone());
        }

        let id = self
            .owner
            .git()
            .write_commit(&self.record)
            .map_err(|e| match e {
                GitError::IncompleteCommit { field } => {
                    BridgeError::NotInitialized(format!("commit has no {}", field))
                }
                GitError::KindMismatch {
                    expected, actual, ..
                } => BridgeError::type_mismatch(
                    Object::kind_type_name(expected),
                    Object::kind_type_name(actual),
                ),
                other => other.into(),
            })?;
        self.record.mark_written(id.clone());
        Ok(id)
    }

    /// Snapshot of every field, for display and JSON output.
    pub fn to_view(&self) -> CommitView {
        CommitView {
            id: self.id().cloned(),
            message: self.message().to_string(),
            message_short: self.message_short(),
            time: self.time(),
            author: self.author().cloned(),
            committer: self.committer().cloned(),
            tree: self.tree_id().cloned(),
            parents: self.parent_ids().cloned().collect(),
        }
    }
}

/// Iterator over a commit's parent ids.
///
/// Probes parent `0, 1, 2, ...` and stops at the first index the record
/// has no parent for.
#[derive(Debug, Clone)]
pub struct ParentIds<'a> {
    record: &'a CommitRecord,
    next: usize,
}

impl<'a> Iterator for ParentIds<'a> {
    type Item = &'a Oid;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.record.parent_id(self.next)?;
        self.next += 1;
        Some(id)
    }
}

impl FusedIterator for ParentIds<'_> {}

/// Serializable snapshot of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitView {
    pub id: Option<Oid>,
    pub message: String,
    pub message_short: String,
    pub time: u64,
    pub author: Option<Person>,
    pub committer: Option<Person>,
    pub tree: Option<Oid>,
    pub parents: Vec<Oid>,
}
