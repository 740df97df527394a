//! Content-addressed object storage for strata.
//!
//! This crate implements a hash-keyed object store in the mold of git's
//! `.git/objects/` directory. Every object -- blob, tree, commit, tag -- is
//! an immutable, zlib-compressed, length-prefixed frame identified by the
//! SHA-1 of its framed bytes.
//!
//! # Layers
//!
//! - [`zlib`] -- lossless compression adapter for stored frames
//! - [`ObjectStore`] -- the backend trait over compressed frame bytes, with
//!   [`FsObjectStore`] (sharded directory tree) and [`InMemoryObjectStore`]
//!   (tests and embedding) implementations
//! - [`Object`] -- the typed object enum and its per-kind payload codecs
//! - [`ObjectDb`] -- the façade: `write(&Object) -> ObjectId`,
//!   `read(&ObjectId) -> Object`
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Reads verify: the recomputed hash must match the requested id.
//! 3. Concurrent reads are always safe; concurrent duplicate writes are
//!    byte-identical and need no locking.
//! 4. The raw store never interprets object contents -- it is a pure
//!    key-value store.
//! 5. All I/O and decode errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod object;
pub mod odb;
pub mod traits;
pub mod zlib;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use object::{Blob, Commit, Object, Tag};
pub use odb::ObjectDb;
pub use traits::ObjectStore;
