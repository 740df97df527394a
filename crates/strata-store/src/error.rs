use std::path::PathBuf;

use strata_types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch: requested {requested}, computed {computed}")]
    HashMismatch {
        requested: ObjectId,
        computed: ObjectId,
    },

    /// A storage location exists but is not a readable object file.
    #[error("corrupt storage at {}: {reason}", .path.display())]
    StorageCorrupt { path: PathBuf, reason: String },

    /// Zlib stream could not be decompressed.
    #[error("corrupt compressed stream: {0}")]
    CorruptStream(String),

    /// The stored frame or payload failed to decode.
    #[error(transparent)]
    Codec(#[from] strata_codec::CodecError),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attempted to store under the null object ID.
    #[error("cannot store object with null ID")]
    NullObjectId,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
