use digi_crypto::HashEngine;
use digi_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{ObjectKind, StoredObject};

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - The key of every stored object equals `H(tag ++ payload)` under the
///   store's [`HashEngine`].
/// - Writing an object that is already present is a no-op that returns the
///   same ID.
/// - Objects are never mutated or removed.
/// - Concurrent reads are always safe; a reader never observes a partially
///   written object.
pub trait ObjectStore: Send + Sync {
    /// The engine used to compute object IDs.
    fn engine(&self) -> HashEngine;

    /// Read an object by its content-addressed ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>>;

    /// Write an object and return its content-addressed ID.
    fn write(&self, object: StoredObject) -> StoreResult<ObjectId>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Store a payload of the given kind and return its ID.
    fn put(&self, kind: ObjectKind, data: Vec<u8>) -> StoreResult<ObjectId> {
        self.write(StoredObject::new(kind, data))
    }

    /// Read an object, treating absence as [`StoreError::NotFound`].
    fn get(&self, id: &ObjectId) -> StoreResult<StoredObject> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }

    /// Read multiple objects in a batch.
    ///
    /// Default implementation calls `read()` for each ID.
    fn read_batch(&self, ids: &[ObjectId]) -> StoreResult<Vec<Option<StoredObject>>> {
        ids.iter().map(|id| self.read(id)).collect()
    }

    /// Write multiple objects in a batch and return their IDs.
    ///
    /// Default implementation calls `write()` for each object.
    fn write_batch(&self, objects: Vec<StoredObject>) -> StoreResult<Vec<ObjectId>> {
        objects.into_iter().map(|obj| self.write(obj)).collect()
    }
}
