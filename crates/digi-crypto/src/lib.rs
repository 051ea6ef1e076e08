//! Cryptographic primitives for Digitionary.
//!
//! Provides the [`HashEngine`] used for every digest in the system and the
//! [`MerkleTree`] builder that turns an ordered list of contents into a
//! binary hash tree.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod hasher;
pub mod merkle;

pub use hasher::{HashAlgorithm, HashEngine, HasherError};
pub use merkle::{BreadthFirst, MerkleTree, Node, NodeKind};
