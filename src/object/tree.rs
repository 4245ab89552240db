//! object::tree
//!
//! Bridged tree, blob and tag objects.
//!
//! These wrap only an id and an owner. Reads go straight to the object
//! database every time; nothing is cached on the wrapper.

use super::{Object, Owner};
use crate::bridge::BridgeError;
use crate::core::types::Oid;
use crate::git::{TagInfo, TreeEntry};

/// A stored tree.
#[derive(Debug, Clone)]
pub struct Tree {
    owner: Owner,
    id: Oid,
}

impl Tree {
    pub(crate) fn new(owner: Owner, id: Oid) -> Self {
        Self { owner, id }
    }

    pub fn id(&self) -> &Oid {
        &self.id
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Entries of the tree, in stored order.
    pub fn entries(&self) -> Result<Vec<TreeEntry>, BridgeError> {
        Ok(self.owner.git().read_tree(&self.id)?)
    }

    /// Wrap the entry called `name`, if there is one.
    pub fn get(&self, name: &str) -> Result<Option<Object>, BridgeError> {
        self.entries()?
            .into_iter()
            .find(|entry| entry.name == name)
            .map(|entry| self.owner.lookup(&entry.oid))
            .transpose()
    }
}

/// A stored blob.
#[derive(Debug, Clone)]
pub struct Blob {
    owner: Owner,
    id: Oid,
}

impl Blob {
    pub(crate) fn new(owner: Owner, id: Oid) -> Self {
        Self { owner, id }
    }

    pub fn id(&self) -> &Oid {
        &self.id
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn content(&self) -> Result<Vec<u8>, BridgeError> {
        Ok(self.owner.git().read_blob(&self.id)?)
    }

    pub fn size(&self) -> Result<usize, BridgeError> {
        Ok(self.content()?.len())
    }
}

/// A stored annotated tag.
#[derive(Debug, Clone)]
pub struct Tag {
    owner: Owner,
    id: Oid,
}

impl Tag {
    pub(crate) fn new(owner: Owner, id: Oid) -> Self {
        Self { owner, id }
    }

    pub fn id(&self) -> &Oid {
        &self.id
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn info(&self) -> Result<TagInfo, BridgeError> {
        Ok(self.owner.git().read_tag(&self.id)?)
    }

    /// The object the tag points at.
    pub fn target(&self) -> Result<Object, BridgeError> {
        let info = self.info()?;
        self.owner.lookup_as(&info.target, info.target_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::person::Person;
    use crate::core::types::ObjectKind;
    use crate::git::Git;
    use tempfile::TempDir;

    fn owner() -> (TempDir, Owner) {
        let dir = TempDir::new().unwrap();
        let git = Git::init(dir.path(), true).unwrap();
        (dir, Owner::new(git))
    }

    #[test]
    fn tree_entry_lookup_by_name() {
        let (_dir, owner) = owner();
        let blob = owner.git().write_blob(b"fn main() {}\n").unwrap();
        let tree_id = owner.git().write_tree(&[("main.rs", &blob)]).unwrap();
        let tree = Tree::new(owner.clone(), tree_id);

        let entry = tree.get("main.rs").unwrap().unwrap();
        assert_eq!(entry.kind(), ObjectKind::Blob);
        assert_eq!(entry.id(), Some(&blob));
        assert!(tree.get("missing.rs").unwrap().is_none());
    }

    #[test]
    fn blob_content_and_size() {
        let (_dir, owner) = owner();
        let id = owner.git().write_blob(b"hello").unwrap();
        let Object::Blob(blob) = owner.lookup(&id).unwrap() else {
            panic!("expected a blob");
        };
        assert_eq!(blob.content().unwrap(), b"hello");
        assert_eq!(blob.size().unwrap(), 5);
    }

    #[test]
    fn tag_target_is_wrapped() {
        let (_dir, owner) = owner();
        let blob = owner.git().write_blob(b"x").unwrap();
        let tree_id = owner.git().write_tree(&[("x", &blob)]).unwrap();
        let tagger = Person::new("T", "t@x.com", 1);
        let tag_id = owner
            .git()
            .write_tag("snapshot", &tree_id, &tagger, "snap")
            .unwrap();

        let Object::Tag(tag) = owner.lookup(&tag_id).unwrap() else {
            panic!("expected a tag");
        };
        assert_eq!(tag.info().unwrap().name, "snapshot");
        let target = tag.target().unwrap();
        assert_eq!(target.kind(), ObjectKind::Tree);
        assert_eq!(target.id(), Some(&tree_id));
        assert!(target.owner().same_repository(&owner));
    }
}
