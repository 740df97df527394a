//! Foundation types for strata.
//!
//! This crate provides the content-address type shared by every other strata
//! crate: [`ObjectId`], the SHA-1 digest of an object's framed bytes.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Content-addressed identifier (20-byte SHA-1)
//! - [`TypeError`] — Parse failures for the textual forms of the above

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
