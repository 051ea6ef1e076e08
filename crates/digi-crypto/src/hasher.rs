use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use digi_types::ObjectId;

/// Digest algorithm backing a [`HashEngine`].
///
/// Both algorithms produce 32-byte digests. `Sha256` is the default and is
/// hash-compatible with existing object populations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    /// Stable lowercase name, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            other => Err(HasherError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Deterministic content hasher shared by the tree builder and the object
/// store.
///
/// Three input shapes are hashed:
/// - leaf content: `H(content)`
/// - a pair of child ids: `H(hex(left) ++ hex(right))`, the children's
///   *hex strings* and not their raw digests
/// - a typed object: `H(tag ++ payload)` with a single tag byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HashEngine {
    algorithm: HashAlgorithm,
}

impl HashEngine {
    /// SHA-256 engine.
    pub const SHA256: Self = Self::new(HashAlgorithm::Sha256);
    /// BLAKE3 engine.
    pub const BLAKE3: Self = Self::new(HashAlgorithm::Blake3);

    /// Create an engine for the given algorithm.
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// The algorithm used by this engine.
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash raw bytes.
    pub fn hash(&self, data: &[u8]) -> ObjectId {
        self.digest(&[data])
    }

    /// Combine two child ids into their parent's id.
    pub fn hash_pair(&self, left: &ObjectId, right: &ObjectId) -> ObjectId {
        let left = left.to_hex();
        let right = right.to_hex();
        self.digest(&[left.as_bytes(), right.as_bytes()])
    }

    /// Hash a typed object payload, prefixed by its one-byte type tag.
    pub fn hash_object(&self, tag: u8, payload: &[u8]) -> ObjectId {
        self.digest(&[&[tag], payload])
    }

    /// Verify that data produces the expected object ID.
    pub fn verify(&self, data: &[u8], expected: &ObjectId) -> bool {
        self.hash(data) == *expected
    }

    fn digest(&self, parts: &[&[u8]]) -> ObjectId {
        match self.algorithm {
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                for part in parts {
                    hasher.update(part);
                }
                ObjectId::from_hash(hasher.finalize().into())
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for part in parts {
                    hasher.update(part);
                }
                ObjectId::from_hash(*hasher.finalize().as_bytes())
            }
        }
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}
