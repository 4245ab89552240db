//! git::record
//!
//! The native in-memory commit record.
//!
//! libgit2 commits are immutable once read. Editing happens on a
//! [`CommitRecord`]: an owned copy of every commit field that can be
//! changed in place and later stored with [`Git::write_commit`].
//!
//! [`Git::write_commit`]: super::Git::write_commit

use crate::core::person::Person;
use crate::core::types::Oid;

/// Editable fields of a commit, detached from the object database.
///
/// A record is either loaded from a stored commit (it has an [`id`]) or
/// freshly constructed (no id until written). Parents are fixed when the
/// record is created.
///
/// A loaded record also keeps what libgit2 stored beside the fields: the
/// UTC offset of each signature and the message summary. They are reused
/// until the field they belong to is replaced.
///
/// [`id`]: CommitRecord::id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    id: Option<Oid>,
    message: String,
    summary: Option<String>,
    author: Option<Person>,
    author_offset: i32,
    committer: Option<Person>,
    committer_offset: i32,
    tree: Option<Oid>,
    parents: Vec<Oid>,
    modified: bool,
}

impl CommitRecord {
    /// A new, unwritten commit with the given parents and an empty message.
    pub fn new(parents: Vec<Oid>) -> Self {
        Self {
            id: None,
            message: String::new(),
            summary: None,
            author: None,
            author_offset: 0,
            committer: None,
            committer_offset: 0,
            tree: None,
            parents,
            modified: true,
        }
    }

    /// A record read from the object database.
    ///
    /// `author` and `committer` carry their UTC offset in minutes.
    pub(crate) fn loaded(
        id: Oid,
        message: String,
        summary: String,
        author: (Person, i32),
        committer: (Person, i32),
        tree: Oid,
        parents: Vec<Oid>,
    ) -> Self {
        Self {
            id: Some(id),
            message,
            summary: Some(summary),
            author: Some(author.0),
            author_offset: author.1,
            committer: Some(committer.0),
            committer_offset: committer.1,
            tree: Some(tree),
            parents,
            modified: false,
        }
    }

    /// Id of the stored version of this record, if it has been stored.
    pub fn id(&self) -> Option<&Oid> {
        self.id.as_ref()
    }

    /// True if the record has changes that are not in the object database.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.summary = None;
        self.modified = true;
    }

    /// Summary line of the message.
    ///
    /// A loaded message keeps the summary libgit2 computed; an edited one
    /// is summarized with [`summarize`].
    pub fn message_short(&self) -> String {
        match &self.summary {
            Some(summary) => summary.clone(),
            None => summarize(&self.message),
        }
    }

    /// Commit time: the committer's timestamp, else the author's, else 0.
    pub fn time(&self) -> u64 {
        self.committer
            .as_ref()
            .or(self.author.as_ref())
            .map_or(0, Person::time)
    }

    pub fn author(&self) -> Option<&Person> {
        self.author.as_ref()
    }

    pub fn set_author(&mut self, author: Person) {
        self.author = Some(author);
        self.author_offset = 0;
        self.modified = true;
    }

    /// UTC offset of the author signature, in minutes.
    pub(crate) fn author_offset(&self) -> i32 {
        self.author_offset
    }

    pub fn committer(&self) -> Option<&Person> {
        self.committer.as_ref()
    }

    pub fn set_committer(&mut self, committer: Person) {
        self.committer = Some(committer);
        self.committer_offset = 0;
        self.modified = true;
    }

    /// UTC offset of the committer signature, in minutes.
    pub(crate) fn committer_offset(&self) -> i32 {
        self.committer_offset
    }

    pub fn tree_id(&self) -> Option<&Oid> {
        self.tree.as_ref()
    }

    pub fn set_tree(&mut self, tree: Oid) {
        self.tree = Some(tree);
        self.modified = true;
    }

    /// The `n`th parent id, or `None` past the last parent.
    pub fn parent_id(&self, n: usize) -> Option<&Oid> {
        self.parents.get(n)
    }

    pub(crate) fn mark_written(&mut self, id: Oid) {
        self.id = Some(id);
        self.modified = false;
    }
}

/// Derive the one-line summary of a commit message, as libgit2 does.
///
/// Leading newlines are skipped and reading stops at the end of the first
/// paragraph. A whitespace run that contains a line break becomes one
/// space; any other run is kept as is. Trailing whitespace is dropped.
///
/// # Example
///
/// ```
/// use commitbridge::git::summarize;
///
/// assert_eq!(summarize("\n\nFix parser\nfor nested input\n\nDetails"), "Fix parser for nested input");
/// assert_eq!(summarize("  indented subject\n\nbody"), "  indented subject");
/// assert_eq!(summarize(""), "");
/// ```
pub fn summarize(message: &str) -> String {
    let message = message.trim_start_matches('\n');
    let bytes = message.as_bytes();
    let mut summary = String::new();
    // Start of the pending whitespace run, and whether it holds a newline.
    let mut space: Option<(usize, bool)> = None;

    for (i, c) in message.char_indices() {
        if c == '\n' {
            let rest = &bytes[i + 1..];
            if rest.is_empty() || rest.starts_with(b"\n") || rest.starts_with(b"\r\n") {
                break;
            }
        }
        if is_git_space(c) {
            let (_, has_newline) = space.get_or_insert((i, false));
            *has_newline |= c == '\n';
            continue;
        }
        if let Some((start, has_newline)) = space.take() {
            if has_newline {
                summary.push(' ');
            } else {
                summary.push_str(&message[start..i]);
            }
        }
        summary.push(c);
    }
    summary
}

/// Whitespace as libgit2's `git__isspace` defines it.
fn is_git_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(c: char) -> Oid {
        Oid::new(c.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn new_record_is_unwritten_root() {
        let record = CommitRecord::new(Vec::new());
        assert!(record.id().is_none());
        assert!(record.is_modified());
        assert_eq!(record.message(), "");
        assert!(record.author().is_none());
        assert!(record.committer().is_none());
        assert!(record.tree_id().is_none());
        assert!(record.parent_id(0).is_none());
    }

    #[test]
    fn parent_probing_stops_at_sentinel() {
        let record = CommitRecord::new(vec![oid('a'), oid('b')]);
        assert_eq!(record.parent_id(0), Some(&oid('a')));
        assert_eq!(record.parent_id(1), Some(&oid('b')));
        assert_eq!(record.parent_id(2), None);
    }

    #[test]
    fn edits_mark_loaded_record_modified() {
        let mut record = CommitRecord::loaded(
            oid('c'),
            "msg".into(),
            "msg".into(),
            (Person::new("A", "a@x.com", 1), 60),
            (Person::new("C", "c@x.com", 2), -300),
            oid('d'),
            Vec::new(),
        );
        assert!(!record.is_modified());

        record.set_message("other");
        assert!(record.is_modified());
        assert_eq!(record.id(), Some(&oid('c')));

        record.mark_written(oid('e'));
        assert!(!record.is_modified());
        assert_eq!(record.id(), Some(&oid('e')));
    }

    #[test]
    fn offsets_kept_until_person_replaced() {
        let mut record = CommitRecord::loaded(
            oid('c'),
            "msg".into(),
            "msg".into(),
            (Person::new("A", "a@x.com", 1), 120),
            (Person::new("C", "c@x.com", 2), -420),
            oid('d'),
            Vec::new(),
        );
        record.set_message("reworded");
        assert_eq!(record.author_offset(), 120);
        assert_eq!(record.committer_offset(), -420);

        record.set_author(Person::new("B", "b@x.com", 3));
        assert_eq!(record.author_offset(), 0);
        assert_eq!(record.committer_offset(), -420);
    }

    #[test]
    fn loaded_summary_dropped_on_edit() {
        let mut record = CommitRecord::loaded(
            oid('c'),
            "subject\n\nbody".into(),
            "stored summary".into(),
            (Person::new("A", "a@x.com", 1), 0),
            (Person::new("C", "c@x.com", 2), 0),
            oid('d'),
            Vec::new(),
        );
        assert_eq!(record.message_short(), "stored summary");

        record.set_message("new subject\n\nbody");
        assert_eq!(record.message_short(), "new subject");
    }

    #[test]
    fn time_prefers_committer() {
        let mut record = CommitRecord::new(Vec::new());
        assert_eq!(record.time(), 0);

        record.set_author(Person::new("A", "a@x.com", 100));
        assert_eq!(record.time(), 100);

        record.set_committer(Person::new("C", "c@x.com", 200));
        assert_eq!(record.time(), 200);
    }

    #[test]
    fn summarize_single_line() {
        assert_eq!(summarize("initial commit"), "initial commit");
        assert_eq!(summarize("initial commit\n"), "initial commit");
    }

    #[test]
    fn summarize_stops_at_blank_line() {
        assert_eq!(summarize("subject\n\nbody text\n"), "subject");
    }

    #[test]
    fn summarize_whitespace_only() {
        assert_eq!(summarize("  \n\t\n"), "");
    }

    #[test]
    fn summarize_keeps_leading_indent() {
        assert_eq!(summarize("  indented subject\n\nbody"), "  indented subject");
        assert_eq!(summarize("\tx  y\nz"), "\tx  y z");
    }

    #[test]
    fn summarize_crlf_paragraph_break() {
        assert_eq!(summarize("subject\r\n\r\nbody"), "subject");
        assert_eq!(summarize("one\r\ntwo"), "one two");
    }
}
