//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to libgit2. Every object
//! read and write flows through [`Git`], which hands back owned values
//! (strong types, [`CommitRecord`], [`TreeEntry`]) and normalizes errors
//! into typed failure categories.
//!
//! # Architecture
//!
//! No other module imports `git2`. This keeps:
//!
//! - Consistent error handling across all Git operations
//! - Strong type guarantees at the boundary
//! - No borrowed libgit2 buffers escaping a call
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::ObjectNotFound`]: No object with the requested id
//! - [`GitError::KindMismatch`]: Object exists but has another kind
//! - [`GitError::IncompleteCommit`]: A commit is missing a required field
//! - [`GitError::CasFailed`]: Compare-and-swap precondition failed
//!
//! # Example
//!
//! ```ignore
//! use commitbridge::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.resolve_commit("HEAD")?;
//! let record = git.read_commit(&head)?;
//! println!("{} {}", head.short(7), record.message_short());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::record::CommitRecord;
use crate::core::person::Person;
use crate::core::types::{ObjectKind, Oid, RefName, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Requested ref or revision does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Compare-and-swap precondition failed.
    #[error("CAS failed for {refname}: expected {expected}, found {actual}")]
    CasFailed {
        /// The ref being updated
        refname: String,
        /// The expected old value
        expected: String,
        /// The actual current value
        actual: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Object exists but is not of the requested kind.
    #[error("object {oid} is a {actual}, not a {expected}")]
    KindMismatch {
        oid: String,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    /// A commit cannot be written without this field.
    #[error("commit has no {field}")]
    IncompleteCommit {
        /// Name of the missing field
        field: &'static str,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid ref name format.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// Timestamp does not fit git's signed representation.
    #[error("timestamp out of range: {time}")]
    TimeOutOfRange { time: u64 },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => {
                if context.starts_with("refs/") || context == "HEAD" {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec | git2::ErrorCode::Ambiguous => GitError::InvalidOid {
                oid: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidRefName(msg) => GitError::InvalidRefName { message: msg },
            TypeError::UnknownObjectKind(kind) => GitError::Internal {
                message: format!("unknown object kind '{}'", kind),
            },
        }
    }
}

/// One entry of a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Entry file name
    pub name: String,
    /// Id of the entry's object
    pub oid: Oid,
    /// Kind of the entry's object (blob, tree, or commit for submodules)
    pub kind: ObjectKind,
    /// Unix file mode as git stores it
    pub filemode: i32,
}

/// Header fields of an annotated tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub target: Oid,
    pub target_kind: ObjectKind,
    pub message: String,
}

/// The Git interface.
///
/// This is the **single point of interaction** with libgit2. All object
/// reads and writes flow through this interface.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository. Bare repositories are accepted: commits can
    /// be read and written without a working tree.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Create a new repository at `path` and open it.
    pub fn init(path: &Path, bare: bool) -> Result<Self, GitError> {
        let repo = if bare {
            git2::Repository::init_bare(path)
        } else {
            git2::Repository::init(path)
        }
        .map_err(|e| GitError::Internal {
            message: format!("init {}: {}", path.display(), e.message()),
        })?;
        Ok(Self { repo })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Check whether two handles refer to the same repository on disk.
    pub fn same_repository(&self, other: &Git) -> bool {
        match (
            self.repo.path().canonicalize(),
            other.repo.path().canonicalize(),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.repo.path() == other.repo.path(),
        }
    }

    /// Identity from git's own `user.name` / `user.email`, stamped now.
    ///
    /// Returns `None` when git has no identity configured.
    pub fn default_person(&self) -> Result<Option<Person>, GitError> {
        match self.repo.signature() {
            Ok(sig) => Ok(Some(person_from_signature(&sig))),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::from_git2(e, "signature")),
        }
    }

    // =========================================================================
    // Revision and Ref Resolution
    // =========================================================================

    /// Resolve a revision expression (`HEAD`, `main~2`, a hex id) to the
    /// object it names, without peeling.
    pub fn resolve(&self, spec: &str) -> Result<Oid, GitError> {
        let object = self
            .repo
            .revparse_single(spec)
            .map_err(|e| revparse_error(e, spec))?;
        to_oid(object.id())
    }

    /// Resolve a revision expression, peeling tags down to a commit.
    pub fn resolve_commit(&self, spec: &str) -> Result<Oid, GitError> {
        let object = self
            .repo
            .revparse_single(spec)
            .map_err(|e| revparse_error(e, spec))?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, spec))?;
        to_oid(commit.id())
    }

    /// Resolve a ref to the OID it directly points at, following symbolic refs.
    ///
    /// Returns `None` if the ref (or HEAD's branch) does not exist yet.
    pub fn try_resolve_ref(&self, refname: &RefName) -> Result<Option<Oid>, GitError> {
        let reference = match self.repo.find_reference(refname.as_str()) {
            Ok(r) => r,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, refname.as_str())),
        };
        match reference.resolve() {
            Ok(direct) => direct.target().map(to_oid).transpose(),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::from_git2(e, refname.as_str())),
        }
    }

    /// Update a ref with compare-and-swap semantics.
    ///
    /// `expected_old` of `None` requires the ref to be absent. A symbolic
    /// ref such as `HEAD` moves the branch it points at.
    ///
    /// # Errors
    ///
    /// - [`GitError::CasFailed`] if the current value doesn't match expected
    pub fn update_ref_cas(
        &self,
        refname: &RefName,
        new_oid: &Oid,
        expected_old: Option<&Oid>,
        message: &str,
    ) -> Result<(), GitError> {
        let current = self.try_resolve_ref(refname)?;

        if current.as_ref() != expected_old {
            let show = |oid: Option<&Oid>| oid.map_or("<none>".to_string(), Oid::to_string);
            return Err(GitError::CasFailed {
                refname: refname.to_string(),
                expected: show(expected_old),
                actual: show(current.as_ref()),
            });
        }

        let target = self.symbolic_target(refname)?;
        let oid = to_git2_oid(new_oid)?;
        self.repo
            .reference(&target, oid, true, message)
            .map_err(|e| GitError::from_git2(e, &target))?;

        Ok(())
    }

    /// The direct ref name a (possibly symbolic) ref resolves to.
    fn symbolic_target(&self, refname: &RefName) -> Result<String, GitError> {
        match self.repo.find_reference(refname.as_str()) {
            Ok(reference) => match reference.symbolic_target() {
                Some(target) => Ok(target.to_string()),
                None => Ok(refname.to_string()),
            },
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(refname.to_string()),
            Err(e) => Err(GitError::from_git2(e, refname.as_str())),
        }
    }

    // =========================================================================
    // Object Lookup
    // =========================================================================

    /// Kind of the object with the given id.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if no such object exists
    pub fn object_kind(&self, oid: &Oid) -> Result<ObjectKind, GitError> {
        let object = self
            .repo
            .find_object(to_git2_oid(oid)?, None)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;
        object
            .kind()
            .and_then(kind_from_git2)
            .ok_or_else(|| GitError::Internal {
                message: format!("object {} has an unsupported kind", oid),
            })
    }

    /// Check that `oid` exists and is of kind `expected`.
    pub fn expect_kind(&self, oid: &Oid, expected: ObjectKind) -> Result<(), GitError> {
        let actual = self.object_kind(oid)?;
        if actual != expected {
            return Err(GitError::KindMismatch {
                oid: oid.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Commits
    // =========================================================================

    /// Load a stored commit into an editable record.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the commit doesn't exist
    /// - [`GitError::KindMismatch`] if the id names another kind of object
    pub fn read_commit(&self, oid: &Oid) -> Result<CommitRecord, GitError> {
        self.expect_kind(oid, ObjectKind::Commit)?;
        let commit = self
            .repo
            .find_commit(to_git2_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let parents = commit
            .parent_ids()
            .map(to_oid)
            .collect::<Result<Vec<_>, _>>()?;

        let author = commit.author();
        let committer = commit.committer();
        let summary = commit
            .summary_bytes()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .unwrap_or_default();

        let record = CommitRecord::loaded(
            oid.clone(),
            String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            summary,
            (person_from_signature(&author), author.when().offset_minutes()),
            (person_from_signature(&committer), committer.when().offset_minutes()),
            to_oid(commit.tree_id())?,
            parents,
        );
        Ok(record)
    }

    /// Store a commit record and return the id of the new commit object.
    ///
    /// The record itself is left untouched; callers mark it written.
    ///
    /// # Errors
    ///
    /// - [`GitError::IncompleteCommit`] if tree, author or committer is unset
    /// - [`GitError::KindMismatch`] if the tree or a parent has the wrong kind
    pub fn write_commit(&self, record: &CommitRecord) -> Result<Oid, GitError> {
        let tree_id = record
            .tree_id()
            .ok_or(GitError::IncompleteCommit { field: "tree" })?;
        let author = record
            .author()
            .ok_or(GitError::IncompleteCommit { field: "author" })?;
        let committer = record
            .committer()
            .ok_or(GitError::IncompleteCommit { field: "committer" })?;

        self.expect_kind(tree_id, ObjectKind::Tree)?;
        let tree = self
            .repo
            .find_tree(to_git2_oid(tree_id)?)
            .map_err(|e| GitError::from_git2(e, tree_id.as_str()))?;

        let mut parents = Vec::new();
        let mut n = 0;
        while let Some(parent_id) = record.parent_id(n) {
            self.expect_kind(parent_id, ObjectKind::Commit)?;
            let parent = self
                .repo
                .find_commit(to_git2_oid(parent_id)?)
                .map_err(|e| GitError::from_git2(e, parent_id.as_str()))?;
            parents.push(parent);
            n += 1;
        }
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        let author_sig = signature_from_person(author, record.author_offset())?;
        let committer_sig = signature_from_person(committer, record.committer_offset())?;

        let oid = self
            .repo
            .commit(
                None,
                &author_sig,
                &committer_sig,
                record.message(),
                &tree,
                &parent_refs,
            )
            .map_err(|e| GitError::Internal {
                message: format!("write commit: {}", e.message()),
            })?;

        to_oid(oid)
    }

    // =========================================================================
    // Trees, Blobs and Tags
    // =========================================================================

    /// List the entries of a tree, in git's stored order.
    pub fn read_tree(&self, oid: &Oid) -> Result<Vec<TreeEntry>, GitError> {
        self.expect_kind(oid, ObjectKind::Tree)?;
        let tree = self
            .repo
            .find_tree(to_git2_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let mut entries = Vec::with_capacity(tree.len());
        for entry in tree.iter() {
            let Some(kind) = entry.kind().and_then(kind_from_git2) else {
                continue;
            };
            entries.push(TreeEntry {
                name: String::from_utf8_lossy(entry.name_bytes()).into_owned(),
                oid: to_oid(entry.id())?,
                kind,
                filemode: entry.filemode(),
            });
        }
        Ok(entries)
    }

    /// Write a tree from `(name, blob id)` pairs and return its id.
    ///
    /// Entries are regular, non-executable files.
    pub fn write_tree(&self, entries: &[(&str, &Oid)]) -> Result<Oid, GitError> {
        let mut builder = self.repo.treebuilder(None)?;
        for (name, oid) in entries {
            self.expect_kind(oid, ObjectKind::Blob)?;
            builder
                .insert(name, to_git2_oid(oid)?, 0o100644)
                .map_err(|e| GitError::Internal {
                    message: format!("tree entry '{}': {}", name, e.message()),
                })?;
        }
        to_oid(builder.write()?)
    }

    /// Write content as a blob and return its OID.
    pub fn write_blob(&self, content: &[u8]) -> Result<Oid, GitError> {
        let oid = self.repo.blob(content).map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;
        to_oid(oid)
    }

    /// Read a blob by OID.
    pub fn read_blob(&self, oid: &Oid) -> Result<Vec<u8>, GitError> {
        self.expect_kind(oid, ObjectKind::Blob)?;
        let blob = self
            .repo
            .find_blob(to_git2_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;
        Ok(blob.content().to_vec())
    }

    /// Write an annotated tag object pointing at `target`.
    ///
    /// Only the object is stored; no `refs/tags/` ref is created.
    #[cfg(test)]
    pub(crate) fn write_tag(
        &self,
        name: &str,
        target: &Oid,
        tagger: &Person,
        message: &str,
    ) -> Result<Oid, GitError> {
        let object = self
            .repo
            .find_object(to_git2_oid(target)?, None)
            .map_err(|e| GitError::from_git2(e, target.as_str()))?;
        let sig = signature_from_person(tagger, 0)?;
        let oid = self
            .repo
            .tag_annotation_create(name, &object, &sig, message)
            .map_err(|e| GitError::Internal {
                message: format!("write tag '{}': {}", name, e.message()),
            })?;
        to_oid(oid)
    }

    /// Read the header of an annotated tag.
    pub fn read_tag(&self, oid: &Oid) -> Result<TagInfo, GitError> {
        self.expect_kind(oid, ObjectKind::Tag)?;
        let tag = self
            .repo
            .find_tag(to_git2_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let target_kind = tag
            .target_type()
            .and_then(kind_from_git2)
            .ok_or_else(|| GitError::Internal {
                message: format!("tag {} has an unsupported target", oid),
            })?;

        Ok(TagInfo {
            name: String::from_utf8_lossy(tag.name_bytes()).into_owned(),
            target: to_oid(tag.target_id())?,
            target_kind,
            message: tag
                .message_bytes()
                .map(|m| String::from_utf8_lossy(m).into_owned())
                .unwrap_or_default(),
        })
    }
}

// =============================================================================
// Conversions at the git2 boundary
// =============================================================================

fn to_oid(oid: git2::Oid) -> Result<Oid, GitError> {
    Oid::new(oid.to_string()).map_err(GitError::from)
}

fn to_git2_oid(oid: &Oid) -> Result<git2::Oid, GitError> {
    git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))
}

fn kind_from_git2(kind: git2::ObjectType) -> Option<ObjectKind> {
    match kind {
        git2::ObjectType::Commit => Some(ObjectKind::Commit),
        git2::ObjectType::Tree => Some(ObjectKind::Tree),
        git2::ObjectType::Blob => Some(ObjectKind::Blob),
        git2::ObjectType::Tag => Some(ObjectKind::Tag),
        _ => None,
    }
}

fn revparse_error(err: git2::Error, spec: &str) -> GitError {
    match err.code() {
        git2::ErrorCode::NotFound => GitError::RefNotFound {
            refname: spec.to_string(),
        },
        _ => GitError::from_git2(err, spec),
    }
}

/// Copy a signature's fields out of libgit2's buffers.
///
/// Timestamps before the epoch are clamped to 0.
fn person_from_signature(sig: &git2::Signature<'_>) -> Person {
    Person::new(
        String::from_utf8_lossy(sig.name_bytes()).into_owned(),
        String::from_utf8_lossy(sig.email_bytes()).into_owned(),
        u64::try_from(sig.when().seconds()).unwrap_or(0),
    )
}

/// Build a signature for `person` in the time zone `offset_minutes` east of UTC.
fn signature_from_person(
    person: &Person,
    offset_minutes: i32,
) -> Result<git2::Signature<'static>, GitError> {
    let seconds = i64::try_from(person.time()).map_err(|_| GitError::TimeOutOfRange {
        time: person.time(),
    })?;
    git2::Signature::new(
        person.name(),
        person.email(),
        &git2::Time::new(seconds, offset_minutes),
    )
    .map_err(|e| GitError::Internal {
        message: format!("invalid signature '{}': {}", person, e.message()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git) {
        let dir = TempDir::new().unwrap();
        let git = Git::init(dir.path(), true).unwrap();
        (dir, git)
    }

    fn tree_with_file(git: &Git, name: &str, content: &str) -> Oid {
        let blob = git.write_blob(content.as_bytes()).unwrap();
        git.write_tree(&[(name, &blob)]).unwrap()
    }

    fn complete_record(tree: Oid, parents: Vec<Oid>, message: &str) -> CommitRecord {
        let mut record = CommitRecord::new(parents);
        record.set_message(message);
        record.set_tree(tree);
        record.set_author(Person::new("A", "a@x.com", 1000));
        record.set_committer(Person::new("C", "c@x.com", 2000));
        record
    }

    mod git_error {
        use super::*;

        #[test]
        fn error_display_formatting() {
            let err = GitError::KindMismatch {
                oid: "abc".into(),
                expected: ObjectKind::Tree,
                actual: ObjectKind::Blob,
            };
            assert_eq!(err.to_string(), "object abc is a blob, not a tree");

            let err = GitError::IncompleteCommit { field: "author" };
            assert_eq!(err.to_string(), "commit has no author");
        }

        #[test]
        fn type_error_conversion() {
            let err: GitError = TypeError::InvalidOid("short".into()).into();
            assert!(matches!(err, GitError::InvalidOid { .. }));
        }
    }

    mod objects {
        use super::*;

        #[test]
        fn open_non_repository_fails() {
            let dir = TempDir::new().unwrap();
            assert!(matches!(
                Git::open(dir.path()),
                Err(GitError::NotARepo { .. })
            ));
        }

        #[test]
        fn blob_roundtrip_and_kind() {
            let (_dir, git) = init_repo();
            let oid = git.write_blob(b"hello").unwrap();
            assert_eq!(git.object_kind(&oid).unwrap(), ObjectKind::Blob);
            assert_eq!(git.read_blob(&oid).unwrap(), b"hello");
        }

        #[test]
        fn missing_object_not_found() {
            let (_dir, git) = init_repo();
            let oid = Oid::new("1".repeat(40)).unwrap();
            assert!(matches!(
                git.object_kind(&oid),
                Err(GitError::ObjectNotFound { .. })
            ));
        }

        #[test]
        fn tree_entries_listed() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "README.md", "# hi\n");
            let entries = git.read_tree(&tree).unwrap();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].name, "README.md");
            assert_eq!(entries[0].kind, ObjectKind::Blob);
            assert_eq!(entries[0].filemode, 0o100644);
        }

        #[test]
        fn tag_header_read_back() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let tagger = Person::new("T", "t@x.com", 3000);
            let tag = git.write_tag("v1.0", &tree, &tagger, "release\n").unwrap();

            let info = git.read_tag(&tag).unwrap();
            assert_eq!(info.name, "v1.0");
            assert_eq!(info.target, tree);
            assert_eq!(info.target_kind, ObjectKind::Tree);
            assert_eq!(info.message, "release\n");
            assert!(git.try_resolve_ref(&RefName::new("refs/tags/v1.0").unwrap()).unwrap().is_none());
        }

        #[test]
        fn read_tree_rejects_blob() {
            let (_dir, git) = init_repo();
            let blob = git.write_blob(b"x").unwrap();
            assert!(matches!(
                git.read_tree(&blob),
                Err(GitError::KindMismatch {
                    expected: ObjectKind::Tree,
                    actual: ObjectKind::Blob,
                    ..
                })
            ));
        }
    }

    mod commits {
        use super::*;

        #[test]
        fn write_then_read_commit() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let record = complete_record(tree.clone(), Vec::new(), "initial commit");

            let oid = git.write_commit(&record).unwrap();
            let loaded = git.read_commit(&oid).unwrap();

            assert_eq!(loaded.id(), Some(&oid));
            assert!(!loaded.is_modified());
            assert_eq!(loaded.message(), "initial commit");
            assert_eq!(loaded.tree_id(), Some(&tree));
            assert_eq!(loaded.author(), Some(&Person::new("A", "a@x.com", 1000)));
            assert_eq!(
                loaded.committer(),
                Some(&Person::new("C", "c@x.com", 2000))
            );
            assert_eq!(loaded.time(), 2000);
            assert!(loaded.parent_id(0).is_none());
        }

        #[test]
        fn parents_preserved_in_order() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let first = git
                .write_commit(&complete_record(tree.clone(), Vec::new(), "one"))
                .unwrap();
            let second = git
                .write_commit(&complete_record(tree.clone(), Vec::new(), "two"))
                .unwrap();
            let merge = git
                .write_commit(&complete_record(
                    tree,
                    vec![first.clone(), second.clone()],
                    "merge",
                ))
                .unwrap();

            let loaded = git.read_commit(&merge).unwrap();
            assert_eq!(loaded.parent_id(0), Some(&first));
            assert_eq!(loaded.parent_id(1), Some(&second));
            assert_eq!(loaded.parent_id(2), None);
        }

        #[test]
        fn incomplete_commit_rejected() {
            let (_dir, git) = init_repo();
            let record = CommitRecord::new(Vec::new());
            assert!(matches!(
                git.write_commit(&record),
                Err(GitError::IncompleteCommit { field: "tree" })
            ));
        }

        #[test]
        fn read_commit_rejects_tree() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            assert!(matches!(
                git.read_commit(&tree),
                Err(GitError::KindMismatch {
                    expected: ObjectKind::Commit,
                    ..
                })
            ));
        }

        /// Write a commit straight through libgit2, signed in time zone `offset`.
        fn native_commit(git: &Git, tree: &Oid, message: &str, offset: i32) -> Oid {
            let sig =
                git2::Signature::new("A", "a@x.com", &git2::Time::new(1000, offset)).unwrap();
            let tree = git.repo.find_tree(to_git2_oid(tree).unwrap()).unwrap();
            let oid = git.repo.commit(None, &sig, &sig, message, &tree, &[]).unwrap();
            to_oid(oid).unwrap()
        }

        #[test]
        fn rewrite_keeps_signature_offsets() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let original = native_commit(&git, &tree, "subject", 120);

            let mut record = git.read_commit(&original).unwrap();
            record.set_message("reworded");
            let rewritten = git.write_commit(&record).unwrap();
            assert_ne!(rewritten, original);

            let commit = git
                .repo
                .find_commit(to_git2_oid(&rewritten).unwrap())
                .unwrap();
            assert_eq!(commit.author().when().offset_minutes(), 120);
            assert_eq!(commit.committer().when().offset_minutes(), 120);
            assert_eq!(commit.author().when().seconds(), 1000);
        }

        #[test]
        fn replaced_person_written_in_utc() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let original = native_commit(&git, &tree, "subject", -300);

            let mut record = git.read_commit(&original).unwrap();
            record.set_author(Person::new("B", "b@x.com", 5000));
            let rewritten = git.write_commit(&record).unwrap();

            let commit = git
                .repo
                .find_commit(to_git2_oid(&rewritten).unwrap())
                .unwrap();
            assert_eq!(commit.author().when().offset_minutes(), 0);
            assert_eq!(commit.committer().when().offset_minutes(), -300);
        }

        #[test]
        fn summary_matches_libgit2() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let messages = [
                "  indented subject\n\nbody",
                "\tx  y\nz",
                "\n\nsubject\nwrapped line\n\nbody",
                "subject\r\n\r\nbody",
                "trailing space  \n",
                "plain",
            ];

            for message in messages {
                let oid = native_commit(&git, &tree, message, 0);
                let commit = git.repo.find_commit(to_git2_oid(&oid).unwrap()).unwrap();
                let native = commit.summary().unwrap_or_default().to_string();

                assert_eq!(crate::git::summarize(message), native, "{:?}", message);
                assert_eq!(git.read_commit(&oid).unwrap().message_short(), native);
            }
        }

        #[test]
        fn timestamp_overflow_rejected() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let mut record = complete_record(tree, Vec::new(), "m");
            record.set_author(Person::new("A", "a@x.com", u64::MAX));
            assert!(matches!(
                git.write_commit(&record),
                Err(GitError::TimeOutOfRange { .. })
            ));
        }
    }

    mod refs {
        use super::*;

        #[test]
        fn cas_create_and_update() {
            let (_dir, git) = init_repo();
            let tree = tree_with_file(&git, "a.txt", "a");
            let one = git
                .write_commit(&complete_record(tree.clone(), Vec::new(), "one"))
                .unwrap();
            let two = git
                .write_commit(&complete_record(tree, vec![one.clone()], "two"))
                .unwrap();
            let main = RefName::new("refs/heads/main").unwrap();

            git.update_ref_cas(&main, &one, None, "create").unwrap();
            assert_eq!(git.try_resolve_ref(&main).unwrap(), Some(one.clone()));

            let stale = git.update_ref_cas(&main, &two, None, "stale");
            assert!(matches!(stale, Err(GitError::CasFailed { .. })));

            git.update_ref_cas(&main, &two, Some(&one), "advance")
                .unwrap();
            assert_eq!(git.resolve_commit("refs/heads/main").unwrap(), two);
        }

        #[test]
        fn unknown_revision_not_found() {
            let (_dir, git) = init_repo();
            assert!(matches!(
                git.resolve("refs/heads/nope"),
                Err(GitError::RefNotFound { .. })
            ));
        }
    }
}
