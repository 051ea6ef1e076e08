use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use digi_crypto::HashEngine;
use digi_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::StoredObject;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// All objects are held behind a single `RwLock`: readers share the lock,
/// writers take it exclusively. Objects live for the lifetime of the store.
pub struct InMemoryObjectStore {
    engine: HashEngine,
    objects: RwLock<HashMap<ObjectId, StoredObject>>,
}

impl InMemoryObjectStore {
    /// Create a new empty store using the default hash engine.
    pub fn new() -> Self {
        Self::with_engine(HashEngine::default())
    }

    /// Create a new empty store that addresses objects with `engine`.
    pub fn with_engine(engine: HashEngine) -> Self {
        Self {
            engine,
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Total payload bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects.read().values().map(|obj| obj.size).sum()
    }

    /// Return a sorted list of all object IDs in the store.
    pub fn all_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.read().keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn engine(&self) -> HashEngine {
        self.engine
    }

    fn read(&self, id: &ObjectId) -> StoreResult<Option<StoredObject>> {
        Ok(self.objects.read().get(id).cloned())
    }

    fn write(&self, object: StoredObject) -> StoreResult<ObjectId> {
        let id = object.compute_id(&self.engine);
        if id.is_null() {
            return Err(StoreError::NullObjectId);
        }
        let (kind, size) = (object.kind, object.size);
        // Identical ID implies identical content, so a present entry wins.
        let inserted = match self.objects.write().entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(object);
                true
            }
        };
        if inserted {
            debug!(id = %id.short_hex(), %kind, size, "stored object");
        }
        Ok(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.objects.read().contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("engine", &self.engine.algorithm())
            .field("object_count", &self.len())
            .finish()
    }
}
