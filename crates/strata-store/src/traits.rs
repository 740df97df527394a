use strata_types::ObjectId;

use crate::error::StoreResult;

/// Content-addressed store for compressed object frames.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. Content-addressing guarantees this:
///   identical framed bytes always produce the same ID.
/// - `put` is idempotent: concurrent writers of the same ID write
///   byte-identical content, so duplicate writes need no coordination.
/// - Either the full frame is available under a key or the key does not
///   resolve; no partial writes are ever exposed.
/// - The store never interprets object contents — it is a pure key-value
///   store over compressed frame bytes.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Persist compressed frame bytes under `id`, creating any intermediate
    /// storage location on demand.
    fn put(&self, id: &ObjectId, compressed: &[u8]) -> StoreResult<()>;

    /// Fetch the compressed frame bytes stored under `id`.
    ///
    /// Errors with [`StoreError::NotFound`] when absent and
    /// [`StoreError::StorageCorrupt`] when the location exists but is not a
    /// readable object file.
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    /// [`StoreError::StorageCorrupt`]: crate::StoreError::StorageCorrupt
    fn get(&self, id: &ObjectId) -> StoreResult<Vec<u8>>;

    /// Check whether an object exists in the store.
    fn contains(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Delete an object by ID. Returns `true` if the object existed.
    ///
    /// Intended for garbage collection only; deleting a referenced object
    /// corrupts whatever references it.
    fn delete(&self, id: &ObjectId) -> StoreResult<bool>;
}
