use digi_types::ObjectId;

use crate::object::ObjectKind;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// The object exists but has a different type than requested.
    #[error("object {id} is a {found}, expected a {expected}")]
    TypeMismatch {
        id: ObjectId,
        expected: ObjectKind,
        found: ObjectKind,
    },

    /// The object payload cannot be decoded.
    #[error("malformed object: {0}")]
    Malformed(String),

    /// Serialization failure while encoding an object.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Attempted to write an object whose ID is the null ID.
    #[error("cannot store object with null ID")]
    NullObjectId,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
