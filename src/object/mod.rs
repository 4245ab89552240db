//! object
//!
//! Bridged objects: native objects paired with the [`Owner`] that
//! resolves their references.
//!
//! # Types
//!
//! - [`Owner`] - Repository context handle
//! - [`Object`] - An object of any kind, as returned by lookups
//! - [`Commit`] - Editable commit with typed accessors
//! - [`Tree`], [`Blob`], [`Tag`] - Read-only wrappers
//!
//! # Example
//!
//! ```ignore
//! use commitbridge::object::{Commit, Owner};
//! use commitbridge::core::person::Person;
//!
//! let owner = Owner::open(Path::new("."))?;
//! let mut commit = Commit::new(&owner);
//! commit.set_message("initial commit");
//! commit.set_author(&Person::new("A", "a@x.com", 1000));
//!
//! assert!(commit.parents()?.is_empty());
//! assert!(commit.tree()?.is_none());
//! ```

mod commit;
mod owner;
mod tree;

pub use commit::{Commit, CommitView, ParentIds};
pub use owner::Owner;
pub use tree::{Blob, Tag, Tree};

use crate::bridge::BridgeError;
use crate::core::types::{ObjectKind, Oid};

/// A bridged object of dynamic kind.
#[derive(Debug, Clone)]
pub enum Object {
    Commit(Commit),
    Tree(Tree),
    Blob(Blob),
    Tag(Tag),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Commit(_) => ObjectKind::Commit,
            Object::Tree(_) => ObjectKind::Tree,
            Object::Blob(_) => ObjectKind::Blob,
            Object::Tag(_) => ObjectKind::Tag,
        }
    }

    /// Id of the object; `None` only for a commit that was never written.
    pub fn id(&self) -> Option<&Oid> {
        match self {
            Object::Commit(c) => c.id(),
            Object::Tree(t) => Some(t.id()),
            Object::Blob(b) => Some(b.id()),
            Object::Tag(t) => Some(t.id()),
        }
    }

    pub fn owner(&self) -> &Owner {
        match self {
            Object::Commit(c) => c.owner(),
            Object::Tree(t) => t.owner(),
            Object::Blob(b) => b.owner(),
            Object::Tag(t) => t.owner(),
        }
    }

    /// Type name as shown in error messages (`Commit`, `Tree`, ...).
    pub fn type_name(&self) -> &'static str {
        Self::kind_type_name(self.kind())
    }

    pub(crate) fn kind_type_name(kind: ObjectKind) -> &'static str {
        match kind {
            ObjectKind::Commit => "Commit",
            ObjectKind::Tree => "Tree",
            ObjectKind::Blob => "Blob",
            ObjectKind::Tag => "Tag",
        }
    }

    /// Unwrap a commit.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::NotInitialized`] if the object is not a commit
    pub fn into_commit(self) -> Result<Commit, BridgeError> {
        match self {
            Object::Commit(c) => Ok(c),
            other => Err(BridgeError::NotInitialized(format!(
                "object is a {}, not a commit",
                other.kind()
            ))),
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Object::Commit(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Object::Tree(t) => Some(t),
            _ => None,
        }
    }
}
