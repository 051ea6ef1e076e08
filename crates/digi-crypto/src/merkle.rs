use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use digi_types::ObjectId;

use crate::hasher::HashEngine;

/// What a [`Node`] holds besides its hash.
///
/// A node is either a leaf carrying its original content or an internal node
/// with exactly two children. Both children of an internal node may be the
/// same `Arc` when an odd level duplicated its last node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    Leaf { data: String },
    Internal { left: Arc<Node>, right: Arc<Node> },
}

/// A node in a [`MerkleTree`]. Immutable once built.
#[derive(Clone, Debug)]
pub struct Node {
    hash: ObjectId,
    kind: NodeKind,
}

impl Node {
    /// Build a leaf whose hash is `H(data)`.
    pub fn leaf(engine: &HashEngine, data: impl Into<String>) -> Self {
        let data = data.into();
        Self {
            hash: engine.hash(data.as_bytes()),
            kind: NodeKind::Leaf { data },
        }
    }

    /// Build an internal node over two children.
    pub fn internal(engine: &HashEngine, left: Arc<Node>, right: Arc<Node>) -> Self {
        Self {
            hash: engine.hash_pair(&left.hash, &right.hash),
            kind: NodeKind::Internal { left, right },
        }
    }

    pub fn hash(&self) -> ObjectId {
        self.hash
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Leaf content, `None` for internal nodes.
    pub fn data(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { data } => Some(data),
            NodeKind::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&Arc<Node>> {
        self.children().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&Arc<Node>> {
        self.children().map(|(_, right)| right)
    }

    /// Both children of an internal node, `None` for leaves.
    pub fn children(&self) -> Option<(&Arc<Node>, &Arc<Node>)> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { left, right } => Some((left, right)),
        }
    }

    /// Returns `true` if both child slots point at the same node.
    pub fn is_duplicated(&self) -> bool {
        self.children()
            .is_some_and(|(left, right)| Arc::ptr_eq(left, right))
    }
}

/// Binary hash tree over an ordered list of contents.
///
/// Every build starts from scratch: there is no append or update. Levels are
/// reduced pairwise left to right; an odd trailing node is paired with
/// itself, so each level halves (rounding up) until one node remains.
#[derive(Clone, Debug, Default)]
pub struct MerkleTree {
    root: Option<Arc<Node>>,
    /// Leaf nodes in input order.
    leaves: Vec<Arc<Node>>,
    height: usize,
}

impl MerkleTree {
    /// Build a tree with the default engine.
    pub fn from_contents<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(&HashEngine::default(), contents)
    }

    /// Build a tree from ordered contents.
    ///
    /// An empty input produces an empty tree. A single leaf is its own root.
    pub fn build<I, S>(engine: &HashEngine, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let leaves: Vec<Arc<Node>> = contents
            .into_iter()
            .map(|data| Arc::new(Node::leaf(engine, data)))
            .collect();
        if leaves.is_empty() {
            debug!("built empty hash tree");
            return Self::default();
        }

        let mut current = leaves.clone();
        let mut height = 1;
        while current.len() > 1 {
            current = current
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    Arc::new(Node::internal(engine, Arc::clone(left), Arc::clone(right)))
                })
                .collect();
            height += 1;
        }

        let root = current.pop();
        if let Some(root) = &root {
            debug!(
                leaves = leaves.len(),
                height,
                root = %root.hash().short_hex(),
                "built hash tree"
            );
        }
        Self {
            root,
            leaves,
            height,
        }
    }

    pub fn root(&self) -> Option<&Arc<Node>> {
        self.root.as_ref()
    }

    /// The root hash, `None` for an empty tree.
    pub fn root_hash(&self) -> Option<ObjectId> {
        self.root.as_ref().map(|root| root.hash())
    }

    pub fn leaves(&self) -> &[Arc<Node>] {
        &self.leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of levels including the leaf level. Zero for an empty tree.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Walk the node graph level by level from the root, left before right.
    ///
    /// A duplicated child is yielded once per slot that references it.
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            queue: self.root.iter().map(|root| (root.as_ref(), 0)).collect(),
        }
    }
}

/// Breadth-first iterator over `(node, depth)` pairs.
pub struct BreadthFirst<'a> {
    queue: VecDeque<(&'a Node, usize)>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.queue.pop_front()?;
        if let Some((left, right)) = node.children() {
            self.queue.push_back((left.as_ref(), depth + 1));
            self.queue.push_back((right.as_ref(), depth + 1));
        }
        Some((node, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ABC_ROOT: &str = "0bdf27bf7ec894ca7cadfe491ec1a3ece840f117989e8c5e9bd7086467bf6c38";

    fn h(data: &str) -> ObjectId {
        HashEngine::SHA256.hash(data.as_bytes())
    }

    fn pair(left: ObjectId, right: ObjectId) -> ObjectId {
        HashEngine::SHA256.hash_pair(&left, &right)
    }

    #[test]
    fn empty_input_has_no_root() {
        let tree = MerkleTree::from_contents(Vec::<String>::new());
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert!(tree.root_hash().is_none());
        assert!(tree.leaves().is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.breadth_first().count(), 0);
    }

    #[test]
    fn single_leaf_is_root() {
        let tree = MerkleTree::from_contents(["x"]);
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.hash(), h("x"));
        assert_eq!(root.data(), Some("x"));
        assert!(Arc::ptr_eq(root, &tree.leaves()[0]));
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn two_leaves_produce_parent() {
        let tree = MerkleTree::from_contents(["a", "b"]);
        let root = tree.root().unwrap();
        assert!(!root.is_leaf());
        assert_eq!(root.data(), None);
        assert_eq!(root.hash(), pair(h("a"), h("b")));
        assert_eq!(root.left().unwrap().hash(), h("a"));
        assert_eq!(root.right().unwrap().hash(), h("b"));
    }

    #[test]
    fn odd_level_duplicates_last_node() {
        let tree = MerkleTree::from_contents(["a", "b", "c"]);
        let expected = pair(pair(h("a"), h("b")), pair(h("c"), h("c")));
        assert_eq!(tree.root_hash(), Some(expected));
        assert_eq!(expected.to_hex(), ABC_ROOT);

        let (_, right) = tree.root().unwrap().children().unwrap();
        assert!(right.is_duplicated());
        assert!(Arc::ptr_eq(right.left().unwrap(), &tree.leaves()[2]));
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn leaves_keep_input_order() {
        let words = ["delta", "alpha", "charlie", "bravo", "echo"];
        let tree = MerkleTree::from_contents(words);
        let data: Vec<&str> = tree.leaves().iter().filter_map(|l| l.data()).collect();
        assert_eq!(data, words);
        assert_eq!(tree.leaf_count(), 5);
    }

    #[test]
    fn order_changes_root() {
        let t1 = MerkleTree::from_contents(["a", "b"]);
        let t2 = MerkleTree::from_contents(["b", "a"]);
        assert_ne!(t1.root_hash(), t2.root_hash());
    }

    #[test]
    fn engine_choice_changes_root() {
        let sha = MerkleTree::build(&HashEngine::SHA256, ["a", "b", "c"]);
        let blake = MerkleTree::build(&HashEngine::BLAKE3, ["a", "b", "c"]);
        assert_ne!(sha.root_hash(), blake.root_hash());
    }

    #[test]
    fn breadth_first_visits_levels_in_order() {
        let tree = MerkleTree::from_contents(["a", "b", "c"]);
        let visited: Vec<(ObjectId, usize)> = tree
            .breadth_first()
            .map(|(node, depth)| (node.hash(), depth))
            .collect();
        assert_eq!(
            visited,
            vec![
                (tree.root_hash().unwrap(), 0),
                (pair(h("a"), h("b")), 1),
                (pair(h("c"), h("c")), 1),
                (h("a"), 2),
                (h("b"), 2),
                (h("c"), 2),
                (h("c"), 2),
            ]
        );
    }

    #[test]
    fn power_of_two_leaves_have_no_duplicates() {
        let words: Vec<String> = (0..8).map(|i| format!("w{i}")).collect();
        let tree = MerkleTree::from_contents(words);
        assert_eq!(tree.height(), 4);
        assert!(tree.breadth_first().all(|(node, _)| !node.is_duplicated()));
    }

    proptest! {
        #[test]
        fn root_is_deterministic(words in proptest::collection::vec("[a-z]{0,8}", 0..40)) {
            let t1 = MerkleTree::from_contents(words.clone());
            let t2 = MerkleTree::from_contents(words);
            prop_assert_eq!(t1.root_hash(), t2.root_hash());
        }

        #[test]
        fn height_is_log2_rounded_up(n in 1usize..200) {
            let tree = MerkleTree::from_contents((0..n).map(|i| i.to_string()));
            let mut expected = 1;
            let mut width = n;
            while width > 1 {
                width = (width + 1) / 2;
                expected += 1;
            }
            prop_assert_eq!(tree.height(), expected);
            prop_assert_eq!(tree.leaf_count(), n);
        }
    }
}
