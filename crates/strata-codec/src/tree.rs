//! The tree-entry wire codec.
//!
//! A tree payload is a bare concatenation of entries, each
//! `mode SP path NUL <20 raw id bytes>` with no delimiter between entries and
//! no outer length prefix. Entry order is preserved exactly on round-trip;
//! nothing here sorts implicitly (see [`Tree::canonical_sort`]).

use serde::{Deserialize, Serialize};
use strata_types::ObjectId;

use crate::error::{CodecError, CodecResult};
use crate::find_byte;

/// Raw id bytes per entry.
const ID_LEN: usize = 20;

/// A single `(mode, path, child id)` triple describing a directory member.
///
/// `mode` is the 5- or 6-byte ASCII octal file mode; `path` is a NUL-free
/// byte string. The child id's own kind is unconstrained: it may name a blob
/// or another tree. Entries hold ids only, never live child objects — the
/// intended access pattern is lazy resolution by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// ASCII octal file mode, 5 or 6 bytes (e.g. `100644`, `40000`).
    pub mode: Vec<u8>,
    /// Entry path (filename or directory name), no embedded NUL.
    pub path: Vec<u8>,
    /// Content-addressed id of the referenced object.
    pub id: ObjectId,
}

impl TreeEntry {
    /// Create an entry, validating the mode length and path contents.
    pub fn new(mode: impl Into<Vec<u8>>, path: impl Into<Vec<u8>>, id: ObjectId) -> CodecResult<Self> {
        let mode = mode.into();
        let path = path.into();
        if mode.len() != 5 && mode.len() != 6 {
            return Err(CodecError::InvalidEntry(format!(
                "mode must be 5 or 6 bytes, got {}",
                mode.len()
            )));
        }
        if path.contains(&0) {
            return Err(CodecError::InvalidEntry("path contains NUL".into()));
        }
        Ok(Self { mode, path, id })
    }

    /// Entry path for ordering purposes: directories compare as `path + "/"`.
    fn sort_key(&self) -> Vec<u8> {
        let mut key = self.path.clone();
        if self.mode.starts_with(b"40000") || self.mode.starts_with(b"040000") {
            key.push(b'/');
        }
        key
    }
}

/// Directory listing object: an ordered sequence of [`TreeEntry`] values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Entries in serialization order.
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Create a tree with the given entries, order kept as given.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Create an empty tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a tree payload, consuming one entry at a time until the buffer
    /// is exhausted.
    pub fn parse(raw: &[u8]) -> CodecResult<Self> {
        let mut entries = Vec::new();
        let mut pos = 0;
        while pos < raw.len() {
            let (next, entry) = parse_entry(raw, pos)?;
            entries.push(entry);
            pos = next;
        }
        Ok(Self { entries })
    }

    /// Encode to the wire form, entries in their current order, no padding.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(&entry.mode);
            out.push(b' ');
            out.extend_from_slice(&entry.path);
            out.push(0);
            out.extend_from_slice(entry.id.as_bytes());
        }
        out
    }

    /// Sort entries into the interoperable canonical order: byte-wise by
    /// path, with directory entries comparing as if their path ended in `/`.
    ///
    /// Never called implicitly; insertion order is authoritative for hashing.
    pub fn canonical_sort(&mut self) {
        self.entries.sort_by_key(TreeEntry::sort_key);
    }

    /// Look up an entry by path.
    pub fn get(&self, path: &[u8]) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode one entry starting at `pos`; returns the offset just past it.
fn parse_entry(raw: &[u8], pos: usize) -> CodecResult<(usize, TreeEntry)> {
    let spc = find_byte(raw, b' ', pos).ok_or_else(|| CodecError::MalformedTreeEntry {
        offset: pos,
        reason: "no space terminating the mode".into(),
    })?;
    let mode_len = spc - pos;
    if mode_len != 5 && mode_len != 6 {
        return Err(CodecError::MalformedTreeEntry {
            offset: pos,
            reason: format!("mode is {mode_len} bytes, expected 5 or 6"),
        });
    }
    let mode = raw[pos..spc].to_vec();

    let nul = find_byte(raw, 0, spc + 1).ok_or_else(|| CodecError::MalformedTreeEntry {
        offset: spc + 1,
        reason: "no NUL terminating the path".into(),
    })?;
    let path = raw[spc + 1..nul].to_vec();

    let id_start = nul + 1;
    if raw.len() < id_start + ID_LEN {
        return Err(CodecError::TruncatedTree {
            offset: id_start,
            remaining: raw.len() - id_start,
        });
    }
    let mut id = [0u8; ID_LEN];
    id.copy_from_slice(&raw[id_start..id_start + ID_LEN]);

    Ok((
        id_start + ID_LEN,
        TreeEntry {
            mode,
            path,
            id: ObjectId::from_raw(id),
        },
    ))
}
