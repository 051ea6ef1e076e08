use serde::{Deserialize, Serialize};

use digi_crypto::HashEngine;
use digi_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// The kind of object stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw content (file contents, arbitrary data).
    Blob,
    /// Directory listing: ordered entries mapping names to object references.
    Tree,
}

impl ObjectKind {
    /// The byte prepended to the payload when computing the object ID.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Blob => 0,
            Self::Tree => 1,
        }
    }

    /// Parse from a tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Blob),
            1 => Some(Self::Tree),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blob => write!(f, "blob"),
            Self::Tree => write!(f, "tree"),
        }
    }
}

/// A stored object: kind tag + payload + cached size.
///
/// `StoredObject` is the unit of storage. The store never interprets the
/// payload; it is a pure key-value store keyed by content hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// The type of this object.
    pub kind: ObjectKind,
    /// The payload bytes.
    pub data: Vec<u8>,
    /// The size of `data` in bytes.
    pub size: u64,
}

impl StoredObject {
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self { kind, data, size }
    }

    /// Compute the content-addressed ID: `H(tag ++ data)`.
    pub fn compute_id(&self, engine: &HashEngine) -> ObjectId {
        engine.hash_object(self.kind.tag(), &self.data)
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Raw content object (analogous to git blob).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn into_stored_object(self) -> StoredObject {
        StoredObject::new(ObjectKind::Blob, self.data)
    }

    /// Decode from a `StoredObject` read under `id`.
    pub fn from_stored_object(id: ObjectId, obj: StoredObject) -> StoreResult<Self> {
        if obj.kind != ObjectKind::Blob {
            return Err(StoreError::TypeMismatch {
                id,
                expected: ObjectKind::Blob,
                found: obj.kind,
            });
        }
        Ok(Self { data: obj.data })
    }
}

// ---------------------------------------------------------------------------
// Tree entries
// ---------------------------------------------------------------------------

/// Conventional file modes for a tree entry.
///
/// [`TreeEntry::mode`] is a raw `u32`, so modes outside this list are stored
/// and read back unchanged; these names only cover the common cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryMode {
    /// Normal file (0o100644).
    Regular,
    /// Executable file (0o100755).
    Executable,
    /// Symbolic link (0o120000).
    Symlink,
    /// Subtree / directory (0o040000).
    Directory,
}

impl EntryMode {
    /// Octal mode value.
    pub fn mode_bits(&self) -> u32 {
        match self {
            Self::Regular => 0o100644,
            Self::Executable => 0o100755,
            Self::Symlink => 0o120000,
            Self::Directory => 0o040000,
        }
    }

    /// Parse from an octal mode value.
    pub fn from_mode_bits(bits: u32) -> Option<Self> {
        match bits {
            0o100644 => Some(Self::Regular),
            0o100755 => Some(Self::Executable),
            0o120000 => Some(Self::Symlink),
            0o040000 => Some(Self::Directory),
            _ => None,
        }
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.mode_bits()
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.mode_bits())
    }
}

/// A single entry in a tree object.
///
/// Field names on the wire are `Name`, `Mode`, `Hash`, in that order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Entry name (filename or directory name).
    #[serde(rename = "Name")]
    pub name: String,
    /// Permission and type bits.
    #[serde(rename = "Mode")]
    pub mode: u32,
    /// Content-addressed ID of the referenced object.
    #[serde(rename = "Hash")]
    pub hash: ObjectId,
}

impl TreeEntry {
    pub fn new(name: impl Into<String>, mode: impl Into<u32>, hash: ObjectId) -> Self {
        Self {
            name: name.into(),
            mode: mode.into(),
            hash,
        }
    }

    /// The conventional mode this entry uses, if any.
    pub fn entry_mode(&self) -> Option<EntryMode> {
        EntryMode::from_mode_bits(self.mode)
    }
}
