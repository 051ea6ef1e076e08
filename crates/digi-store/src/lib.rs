//! Content-addressed object storage for Digitionary.
//!
//! This crate implements a hash-keyed object store analogous to git's
//! `.git/objects/` directory, held entirely in memory. Every object is a
//! type tag plus an opaque payload, stored under `H(tag ++ payload)`.
//!
//! # Object Types
//!
//! - [`ObjectKind::Blob`] -- raw content
//! - [`ObjectKind::Tree`] -- ordered [`TreeEntry`] list, encoded by [`TreeCodec`]
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`InMemoryObjectStore`] -- `HashMap` behind a single `RwLock`
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. The store is append-only: there is no update and no delete.
//! 3. Concurrent reads are always safe; writes are mutually exclusive.
//! 4. The store never interprets object contents -- decoding is the codec's job.

pub mod codec;
pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use codec::TreeCodec;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use object::{Blob, EntryMode, ObjectKind, StoredObject, TreeEntry};
pub use traits::ObjectStore;
