//! In-memory object store for testing and ephemeral use.
//!
//! [`InMemoryObjectStore`] holds compressed frames in a `HashMap` behind a
//! `RwLock`. It implements the full [`ObjectStore`] trait and is suitable for
//! unit tests, embedding, and short-lived processes.

use std::collections::HashMap;
use std::sync::RwLock;

use strata_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Total compressed bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    /// Remove all objects from the store.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of all object IDs in the store.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let map = self.objects.read().expect("lock poisoned");
        let mut ids: Vec<ObjectId> = map.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put(&self, id: &ObjectId, compressed: &[u8]) -> StoreResult<()> {
        if id.is_null() {
            return Err(StoreError::NullObjectId);
        }
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: if already present, skip (content-addressing guarantees
        // the same ID always maps to the same content).
        map.entry(*id).or_insert_with(|| compressed.to_vec());
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        let map = self.objects.read().expect("lock poisoned");
        map.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }

    fn delete(&self, id: &ObjectId) -> StoreResult<bool> {
        let mut map = self.objects.write().expect("lock poisoned");
        Ok(map.remove(id).is_some())
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(data: &[u8]) -> ObjectId {
        ObjectId::hash_frame(data)
    }

    #[test]
    fn put_and_get() {
        let store = InMemoryObjectStore::new();
        let id = id_of(b"frame-1");
        store.put(&id, b"compressed bytes").unwrap();
        assert_eq!(store.get(&id).unwrap(), b"compressed bytes");
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = id_of(b"missing");
        let err = store.get(&id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(got) if got == id));
    }

    #[test]
    fn put_null_id_is_rejected() {
        let store = InMemoryObjectStore::new();
        let err = store.put(&ObjectId::null(), b"x").unwrap_err();
        assert!(matches!(err, StoreError::NullObjectId));
    }

    #[test]
    fn put_is_idempotent() {
        let store = InMemoryObjectStore::new();
        let id = id_of(b"dup");
        store.put(&id, b"bytes").unwrap();
        store.put(&id, b"bytes").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn contains_and_delete() {
        let store = InMemoryObjectStore::new();
        let id = id_of(b"here");
        assert!(!store.contains(&id).unwrap());

        store.put(&id, b"data").unwrap();
        assert!(store.contains(&id).unwrap());

        assert!(store.delete(&id).unwrap());
        assert!(!store.contains(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
    }

    #[test]
    fn len_total_bytes_and_clear() {
        let store = InMemoryObjectStore::new();
        assert!(store.is_empty());
        store.put(&id_of(b"a"), b"12345").unwrap();
        store.put(&id_of(b"b"), b"123456789").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_bytes(), 14);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn all_ids_is_sorted() {
        let store = InMemoryObjectStore::new();
        for data in [b"aaa".as_slice(), b"bbb", b"ccc"] {
            store.put(&id_of(data), data).unwrap();
        }
        let ids = store.all_ids();
        assert_eq!(ids.len(), 3);
        for w in ids.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let id = id_of(b"shared");
        store.put(&id, b"shared data").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    assert_eq!(store.get(&id).unwrap(), b"shared data");
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn debug_format() {
        let store = InMemoryObjectStore::new();
        store.put(&id_of(b"x"), b"x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("object_count"));
    }
}
