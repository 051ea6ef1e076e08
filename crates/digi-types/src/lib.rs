//! Foundation types for Digitionary.
//!
//! Every other Digitionary crate depends on `digi-types`. It carries the
//! identifier shared by the hash tree and the object store.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- 32-byte content digest, hex-encoded at every boundary

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
