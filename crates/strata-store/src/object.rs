//! Typed in-memory objects and their payload codecs.
//!
//! [`Object`] is the closed set of object kinds. Each variant pairs the
//! frame tag with the codec for its payload; dispatch is a single exhaustive
//! match, so a missing kind is a compile error. Objects are plain values:
//! they hold ids, never live references into storage.

use serde::{Deserialize, Serialize};
use strata_codec::{frame, unframe, CodecResult, Kvlm, ObjectKind, Tree};
use strata_types::ObjectId;

/// Raw content object. Serialization is the identity function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

/// Commit record: KVLM headers plus the commit message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub kvlm: Kvlm,
}

impl Commit {
    /// Create a commit around existing KVLM data.
    pub fn new(kvlm: Kvlm) -> Self {
        Self { kvlm }
    }

    /// The `tree` header: hex id of the root tree, as stored.
    pub fn tree(&self) -> Option<&[u8]> {
        self.kvlm.get(b"tree")
    }

    /// All `parent` headers, in order. Empty for a root commit.
    pub fn parents(&self) -> Vec<&[u8]> {
        self.kvlm.get_all(b"parent")
    }

    /// The `author` header, as stored.
    pub fn author(&self) -> Option<&[u8]> {
        self.kvlm.get(b"author")
    }

    /// The commit message.
    pub fn message(&self) -> &[u8] {
        self.kvlm.message()
    }
}

/// Annotated tag. KVLM-shaped like [`Commit`]; only the frame tag differs.
/// No fixed field set is imposed beyond what the KVLM carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub kvlm: Kvlm,
}

impl Tag {
    /// Create a tag around existing KVLM data.
    pub fn new(kvlm: Kvlm) -> Self {
        Self { kvlm }
    }
}

/// A typed object: the unit the façade reads and writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// The frame tag for this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
            Self::Tag(_) => ObjectKind::Tag,
        }
    }

    /// Serialize the payload via the codec matching this object's kind.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::Blob(blob) => blob.data.clone(),
            Self::Tree(tree) => tree.serialize(),
            Self::Commit(commit) => commit.kvlm.serialize(),
            Self::Tag(tag) => tag.kvlm.serialize(),
        }
    }

    /// Reconstruct a typed object from a payload, dispatching on `kind`.
    pub fn from_payload(kind: ObjectKind, payload: &[u8]) -> CodecResult<Self> {
        Ok(match kind {
            ObjectKind::Blob => Self::Blob(Blob::new(payload)),
            ObjectKind::Tree => Self::Tree(Tree::parse(payload)?),
            ObjectKind::Commit => Self::Commit(Commit::new(Kvlm::parse(payload)?)),
            ObjectKind::Tag => Self::Tag(Tag::new(Kvlm::parse(payload)?)),
        })
    }

    /// The canonical framed bytes this object hashes over.
    pub fn to_frame(&self) -> Vec<u8> {
        frame(self.kind(), &self.payload())
    }

    /// Compute this object's content address without touching any store.
    pub fn id(&self) -> ObjectId {
        ObjectId::hash_frame(&self.to_frame())
    }

    /// Round-trip helper: decode an object straight from framed bytes.
    pub fn from_frame(raw: &[u8]) -> CodecResult<Self> {
        let (kind, payload) = unframe(raw)?;
        Self::from_payload(kind, payload)
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Self::Commit(commit)
    }
}

impl From<Tag> for Object {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}
