//! Byte-exact codecs for the strata object model.
//!
//! Three wire formats live here, each with an exact byte-level contract:
//!
//! - [`frame`] — the canonical object frame `kind SP decimal-length NUL
//!   payload` that content addressing is computed over
//! - [`tree`] — the ordered `(mode, path, child-id)` directory listing
//! - [`kvlm`] — the key-value-list-with-message structure carried by commit
//!   and tag payloads, including its continuation-line convention
//!
//! Get the framing or the continuation-line rule wrong and hashes diverge or
//! parses corrupt data silently, so every decoder here rejects malformed
//! input with a distinct [`CodecError`] variant rather than tolerating it.
//!
//! All codecs are pure transformations over caller-owned buffers: no I/O, no
//! shared state, safe to call concurrently.

pub mod error;
pub mod frame;
pub mod kvlm;
pub mod tree;

pub use error::{CodecError, CodecResult};
pub use frame::{frame, unframe, ObjectKind};
pub use kvlm::{Kvlm, Value};
pub use tree::{Tree, TreeEntry};

/// Position of the first `byte` at or after `from`, as an absolute offset.
pub(crate) fn find_byte(raw: &[u8], byte: u8, from: usize) -> Option<usize> {
    raw.get(from..)?.iter().position(|&b| b == byte).map(|i| from + i)
}
