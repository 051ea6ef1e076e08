//! Node/link view of a built tree, for rendering.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use digi_crypto::MerkleTree;

use crate::error::{SdkError, SdkResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Leaf,
    Internal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Full hex hash of the node.
    pub id: String,
    /// Leaf content, or a short hash for internal nodes.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    /// Depth from the root at first visit.
    pub level: usize,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    /// Walk the tree breadth-first from the root.
    ///
    /// Each distinct hash becomes one node. Every parent-to-child edge is a
    /// link, so a duplicated child contributes two identical links.
    pub fn from_tree(tree: &MerkleTree) -> Self {
        let mut graph = Self::default();
        let mut seen = HashSet::new();

        for (node, level) in tree.breadth_first() {
            let id = node.hash().to_hex();
            if seen.insert(node.hash()) {
                let (label, node_type) = match node.data() {
                    Some(data) => (data.to_string(), NodeType::Leaf),
                    None => (format!("{}...", node.hash().short_hex()), NodeType::Internal),
                };
                graph.nodes.push(GraphNode {
                    id: id.clone(),
                    label,
                    level,
                    node_type,
                });
            }
            if let Some((left, right)) = node.children() {
                for child in [left, right] {
                    graph.links.push(GraphLink {
                        source: id.clone(),
                        target: child.hash().to_hex(),
                    });
                }
            }
        }
        graph
    }

    pub fn to_json(&self) -> SdkResult<String> {
        serde_json::to_string(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> SdkResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_has_empty_graph() {
        let graph = GraphData::from_tree(&MerkleTree::default());
        assert_eq!(graph.to_json().unwrap(), r#"{"nodes":[],"links":[]}"#);
    }

    #[test]
    fn single_leaf_graph() {
        let tree = MerkleTree::from_contents(["x"]);
        let graph = GraphData::from_tree(&tree);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.links.is_empty());
        assert_eq!(graph.nodes[0].label, "x");
        assert_eq!(graph.nodes[0].node_type, NodeType::Leaf);
        assert_eq!(graph.nodes[0].level, 0);
    }

    #[test]
    fn odd_tree_graph_dedups_nodes_but_keeps_links() {
        let tree = MerkleTree::from_contents(["a", "b", "c"]);
        let graph = GraphData::from_tree(&tree);

        // root, ab, cc, a, b, c
        assert_eq!(graph.nodes.len(), 6);
        // root->ab, root->cc, ab->a, ab->b, cc->c, cc->c
        assert_eq!(graph.links.len(), 6);

        let root = &graph.nodes[0];
        assert_eq!(root.id, tree.root_hash().unwrap().to_hex());
        assert_eq!(root.node_type, NodeType::Internal);
        assert_eq!(root.label, format!("{}...", &root.id[..8]));

        let leaves: Vec<(&str, usize)> = graph
            .nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Leaf)
            .map(|n| (n.label.as_str(), n.level))
            .collect();
        assert_eq!(leaves, vec![("a", 2), ("b", 2), ("c", 2)]);

        let c_hash = tree.leaves()[2].hash().to_hex();
        assert_eq!(graph.links.iter().filter(|l| l.target == c_hash).count(), 2);
    }

    #[test]
    fn json_uses_type_field() {
        let tree = MerkleTree::from_contents(["only"]);
        let json = GraphData::from_tree(&tree).to_json().unwrap();
        assert!(json.contains(r#""type":"leaf""#));
        assert!(json.contains(r#""label":"only""#));
        let parsed: GraphData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.nodes[0].label, "only");
    }
}
