use tracing::{debug, info};

use digi_crypto::{HashEngine, MerkleTree};
use digi_store::{
    Blob, InMemoryObjectStore, ObjectKind, ObjectStore, StoreError, StoredObject, TreeCodec,
    TreeEntry,
};
use digi_types::ObjectId;

use crate::config::DigiConfig;
use crate::error::SdkResult;
use crate::graph::GraphData;

/// Split a delimited word list into tree contents.
///
/// Each piece is trimmed; empty pieces are dropped.
pub fn split_contents(input: &str, delimiter: char) -> Vec<String> {
    input
        .split(delimiter)
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// A caller-held workspace: one object store plus the most recently built
/// tree.
///
/// Hashes cross this API as hex strings. Every returned value is owned.
pub struct Session {
    config: DigiConfig,
    engine: HashEngine,
    store: InMemoryObjectStore,
    current: Option<MerkleTree>,
}

impl Session {
    /// Open a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DigiConfig::default())
    }

    pub fn with_config(config: DigiConfig) -> Self {
        let engine = config.engine();
        info!(hash = %engine.algorithm(), "session opened");
        Self {
            config,
            engine,
            store: InMemoryObjectStore::with_engine(engine),
            current: None,
        }
    }

    // ---- Hash tree ----

    /// Build a tree without touching the session's current tree.
    pub fn build_tree<I, S>(&self, contents: I) -> MerkleTree
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MerkleTree::build(&self.engine, contents)
    }

    /// Rebuild the current tree from a delimited word list and return its
    /// root hash, or `""` if no words remain after trimming.
    pub fn add_words(&mut self, input: &str) -> String {
        let words = split_contents(input, self.config.delimiter);
        debug!(words = words.len(), "rebuilding current tree");
        let tree = self.build_tree(words);
        let root = root_hex(&tree);
        self.current = Some(tree);
        root
    }

    pub fn current_tree(&self) -> Option<&MerkleTree> {
        self.current.as_ref()
    }

    /// Root hash of the current tree, `""` if there is none.
    pub fn root_hex(&self) -> String {
        self.current.as_ref().map(root_hex).unwrap_or_default()
    }

    /// Node/link graph of the current tree.
    pub fn graph(&self) -> GraphData {
        self.current
            .as_ref()
            .map(GraphData::from_tree)
            .unwrap_or_default()
    }

    // ---- Object store ----

    pub fn put_object(&self, kind: ObjectKind, payload: Vec<u8>) -> SdkResult<String> {
        Ok(self.store.put(kind, payload)?.to_hex())
    }

    /// Look up an object by hex hash. Unknown or unparsable hashes are `None`.
    pub fn get_object(&self, hash: &str) -> SdkResult<Option<StoredObject>> {
        let Ok(id) = ObjectId::from_hex(hash) else {
            return Ok(None);
        };
        Ok(self.store.read(&id)?)
    }

    pub fn put_tree(&self, entries: &[TreeEntry]) -> SdkResult<String> {
        Ok(TreeCodec::put_tree(&self.store, entries)?.to_hex())
    }

    /// Read a tree by hex hash.
    ///
    /// `None` when the hash is unknown or names a non-tree object; a tree
    /// whose payload does not decode is an error.
    pub fn read_tree(&self, hash: &str) -> SdkResult<Option<Vec<TreeEntry>>> {
        let Ok(id) = ObjectId::from_hex(hash) else {
            return Ok(None);
        };
        match TreeCodec::read_tree(&self.store, &id) {
            Ok(entries) => Ok(Some(entries)),
            Err(StoreError::NotFound(_) | StoreError::TypeMismatch { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write_blob(&self, data: &[u8]) -> SdkResult<ObjectId> {
        let stored = Blob::new(data.to_vec()).into_stored_object();
        Ok(self.store.write(stored)?)
    }

    pub fn read_blob(&self, id: &ObjectId) -> SdkResult<Vec<u8>> {
        let obj = self.store.get(id)?;
        Ok(Blob::from_stored_object(*id, obj)?.data)
    }

    // ---- Accessors ----

    pub fn config(&self) -> &DigiConfig {
        &self.config
    }

    pub fn engine(&self) -> HashEngine {
        self.engine
    }

    pub fn store(&self) -> &InMemoryObjectStore {
        &self.store
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn root_hex(tree: &MerkleTree) -> String {
    tree.root_hash().map(|id| id.to_hex()).unwrap_or_default()
}
