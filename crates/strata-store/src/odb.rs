//! The typed object façade: read-by-id and write-returning-id over any
//! [`ObjectStore`] backend.
//!
//! Write path: serialize the payload via the kind's codec, frame it, hash
//! the frame, compress, persist under the hash. Read path reverses each
//! step and additionally verifies that the recomputed hash matches the
//! requested id, so a corrupted backend can never hand back wrong content
//! under an id that claims integrity.

use strata_types::ObjectId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::Object;
use crate::traits::ObjectStore;
use crate::zlib;

/// Content-addressed object database over a raw store backend.
pub struct ObjectDb<S: ObjectStore> {
    store: S,
}

impl<S: ObjectStore> ObjectDb<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write an object and return its content address.
    ///
    /// Idempotent: rewriting an object that is already stored is a no-op
    /// observably.
    pub fn write(&self, object: &Object) -> StoreResult<ObjectId> {
        let framed = object.to_frame();
        let id = ObjectId::hash_frame(&framed);
        let compressed = zlib::compress(&framed)?;
        self.store.put(&id, &compressed)?;
        debug!(id = %id.short_hex(), kind = %object.kind(), "wrote object");
        Ok(id)
    }

    /// Read the object stored under `id`.
    ///
    /// The whole object round-trips or the operation fails; there is no
    /// partial-success mode.
    pub fn read(&self, id: &ObjectId) -> StoreResult<Object> {
        let compressed = self.store.get(id)?;
        let framed = zlib::decompress(&compressed)?;

        let computed = ObjectId::hash_frame(&framed);
        if computed != *id {
            return Err(StoreError::HashMismatch {
                requested: *id,
                computed,
            });
        }

        Ok(Object::from_frame(&framed)?)
    }

    /// Check whether an object exists without decoding it.
    pub fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        self.store.contains(id)
    }
}

impl<S: ObjectStore + std::fmt::Debug> std::fmt::Debug for ObjectDb<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectDb").field("store", &self.store).finish()
    }
}
