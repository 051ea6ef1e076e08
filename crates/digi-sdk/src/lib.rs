//! High-level SDK for Digitionary.
//!
//! Wraps the hash tree and the object store behind an explicit [`Session`]
//! value held by the caller. Nothing here is global: two sessions never see
//! each other's trees or objects.

pub mod config;
pub mod error;
pub mod graph;
pub mod session;

pub use config::DigiConfig;
pub use error::{SdkError, SdkResult};
pub use graph::{GraphData, GraphLink, GraphNode, NodeType};
pub use session::{split_contents, Session};

// Re-export key types
pub use digi_crypto::{HashAlgorithm, HashEngine, MerkleTree, Node};
pub use digi_store::{EntryMode, ObjectKind, StoredObject, TreeEntry};
pub use digi_types::ObjectId;
