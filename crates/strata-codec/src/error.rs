use thiserror::Error;

/// Errors that can occur while encoding or decoding object payloads.
///
/// Every decoder failure is a distinct, inspectable variant. A malformed
/// object indicates corruption or an upstream programming error; nothing here
/// is recovered or retried locally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Frame header inconsistent with the actual payload, or unparsable.
    #[error("malformed object: {reason}")]
    MalformedObject { reason: String },

    /// The frame's type tag is not one of the known object kinds.
    #[error("unknown object type: {0:?}")]
    UnknownObjectType(String),

    /// A tree entry with a bad mode or missing separator.
    #[error("malformed tree entry at offset {offset}: {reason}")]
    MalformedTreeEntry { offset: usize, reason: String },

    /// A tree payload that ends before a full 20-byte child id.
    #[error("truncated tree at offset {offset}: {remaining} bytes remain, 20 needed")]
    TruncatedTree { offset: usize, remaining: usize },

    /// A KVLM payload that violates the message-boundary invariant.
    #[error("malformed commit at offset {offset}: {reason}")]
    MalformedCommit { offset: usize, reason: String },

    /// An entry under construction with an invalid mode or path.
    #[error("invalid tree entry: {0}")]
    InvalidEntry(String),
}

/// Convenience type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
