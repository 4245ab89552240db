//! object::owner
//!
//! The repository context a bridged object was produced by.

use std::path::Path;
use std::rc::Rc;

use super::{Blob, Commit, Object, Tag, Tree};
use crate::bridge::BridgeError;
use crate::core::types::{ObjectKind, Oid};
use crate::git::{Git, GitError};

/// Shared handle to the repository that resolves object ids.
///
/// Every bridged object carries a clone of its owner. The handle is
/// reference counted and single-threaded; cloning it is cheap and never
/// copies repository state.
#[derive(Clone)]
pub struct Owner {
    git: Rc<Git>,
}

impl std::fmt::Debug for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Owner")
            .field("git_dir", &self.git.git_dir())
            .finish()
    }
}

impl Owner {
    pub fn new(git: Git) -> Self {
        Self { git: Rc::new(git) }
    }

    /// Discover and open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        Git::open(path).map(Self::new)
    }

    /// The native repository interface.
    pub fn git(&self) -> &Git {
        &self.git
    }

    /// True if both handles resolve ids against the same repository.
    pub fn same_repository(&self, other: &Owner) -> bool {
        Rc::ptr_eq(&self.git, &other.git) || self.git.same_repository(&other.git)
    }

    /// Wrap the object with id `oid` as a bridged object of its own kind.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] (wrapped) if no such object exists
    pub fn lookup(&self, oid: &Oid) -> Result<Object, BridgeError> {
        let kind = self.git.object_kind(oid)?;
        self.wrap(oid, kind)
    }

    /// Like [`lookup`](Self::lookup), but the object must be of `kind`.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::TypeMismatch`] if the object has another kind
    pub fn lookup_as(&self, oid: &Oid, kind: ObjectKind) -> Result<Object, BridgeError> {
        self.expect_kind(oid, kind)?;
        self.wrap(oid, kind)
    }

    /// Check the kind of `oid`, reporting a mismatch as a type error.
    pub(crate) fn expect_kind(&self, oid: &Oid, kind: ObjectKind) -> Result<(), BridgeError> {
        match self.git.expect_kind(oid, kind) {
            Ok(()) => Ok(()),
            Err(GitError::KindMismatch {
                expected, actual, ..
            }) => Err(BridgeError::type_mismatch(
                Object::kind_type_name(expected),
                Object::kind_type_name(actual),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn wrap(&self, oid: &Oid, kind: ObjectKind) -> Result<Object, BridgeError> {
        let object = match kind {
            ObjectKind::Commit => Object::Commit(Commit::lookup(self, oid)?),
            ObjectKind::Tree => Object::Tree(Tree::new(self.clone(), oid.clone())),
            ObjectKind::Blob => Object::Blob(Blob::new(self.clone(), oid.clone())),
            ObjectKind::Tag => Object::Tag(Tag::new(self.clone(), oid.clone())),
        };
        Ok(object)
    }
}
