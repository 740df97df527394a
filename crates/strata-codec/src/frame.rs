//! The canonical object frame: `kind SP decimal-length NUL payload`.
//!
//! Content addresses are computed over the exact framed byte sequence, so the
//! frame layout is load-bearing: a one-byte change here changes every hash.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::find_byte;

/// The kind of object stored. A closed set: codec dispatch is an exhaustive
/// match on this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw content (file contents, arbitrary data).
    Blob,
    /// Directory listing: ordered entries mapping paths to object ids.
    Tree,
    /// Commit record: KVLM headers plus a free-text message.
    Commit,
    /// Annotated tag. KVLM-shaped like a commit, distinguished by tag only.
    Tag,
}

impl ObjectKind {
    /// The ASCII tag written into the frame header.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
            Self::Tag => "tag",
        }
    }

    /// Parse a frame tag. Returns `None` for anything outside the known set.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"blob" => Some(Self::Blob),
            b"tree" => Some(Self::Tree),
            b"commit" => Some(Self::Commit),
            b"tag" => Some(Self::Tag),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Build the canonical frame for a payload: `kind SP len NUL payload`.
///
/// Pure function; the returned bytes are what gets hashed and stored.
pub fn frame(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind.tag(), payload.len());
    let mut out = Vec::with_capacity(header.len() + payload.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(payload);
    out
}

/// Recover `(kind, payload)` from a frame.
///
/// Rejects a frame whose declared length disagrees with the actual trailing
/// byte count — corrupt frames are never silently truncated or padded.
pub fn unframe(raw: &[u8]) -> CodecResult<(ObjectKind, &[u8])> {
    let spc = find_byte(raw, b' ', 0).ok_or_else(|| CodecError::MalformedObject {
        reason: "missing type/length separator".into(),
    })?;
    let nul = find_byte(raw, 0, spc + 1).ok_or_else(|| CodecError::MalformedObject {
        reason: "missing length/payload separator".into(),
    })?;

    let declared: usize = std::str::from_utf8(&raw[spc + 1..nul])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CodecError::MalformedObject {
            reason: "unparsable declared length".into(),
        })?;

    let payload = &raw[nul + 1..];
    if declared != payload.len() {
        return Err(CodecError::MalformedObject {
            reason: format!("declared length {} but payload is {} bytes", declared, payload.len()),
        });
    }

    let kind = ObjectKind::from_tag(&raw[..spc]).ok_or_else(|| {
        CodecError::UnknownObjectType(String::from_utf8_lossy(&raw[..spc]).into_owned())
    })?;

    Ok((kind, payload))
}
