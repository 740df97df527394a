//! Filesystem-backed object store.
//!
//! Objects live under a root directory, sharded two levels deep on the hex
//! form of the id: `<root>/<first 2 hex chars>/<remaining 38>`. Sharding
//! keeps individual directories small; it is a storage-layer convention only
//! and never part of the object model.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use strata_types::ObjectId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// Object store over a sharded directory tree.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at `root`. The directory is created lazily on the
    /// first write; opening never touches the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage location for an id: `<root>/<hex[..2]>/<hex[2..]>`.
    fn object_path(&self, id: &ObjectId) -> PathBuf {
        let hex = id.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&self, id: &ObjectId, compressed: &[u8]) -> StoreResult<()> {
        if id.is_null() {
            return Err(StoreError::NullObjectId);
        }
        let path = self.object_path(id);
        if path.is_file() {
            // Idempotent: identical content is already on disk.
            debug!(id = %id.short_hex(), "object already stored, skipping write");
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, compressed)?;
        debug!(id = %id.short_hex(), bytes = compressed.len(), "stored object");
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        let path = self.object_path(id);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(*id)),
            Err(e) => {
                // A directory (or other non-file) where an object file is
                // expected is store corruption, not a missing object.
                if path.exists() && !path.is_file() {
                    return Err(StoreError::StorageCorrupt {
                        path,
                        reason: "location exists but is not a regular file".into(),
                    });
                }
                Err(StoreError::Io(e))
            }
        }
    }

    fn contains(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }

    fn delete(&self, id: &ObjectId) -> StoreResult<bool> {
        let path = self.object_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

impl std::fmt::Debug for FsObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsObjectStore")
            .field("root", &self.root)
            .finish()
    }
}
