//! Ordered node selection.

use pt_core::NodeId;

use crate::trie::PathTrie;

/// Selected nodes in the order the user picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSelection {
    nodes: Vec<NodeId>,
}

impl TreeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single node.
    pub fn select(&mut self, id: NodeId) {
        self.nodes.clear();
        self.nodes.push(id);
    }

    /// Add or remove a node (ctrl-click).
    pub fn toggle(&mut self, id: NodeId) {
        if let Some(pos) = self.nodes.iter().position(|n| *n == id) {
            self.nodes.remove(pos);
        } else {
            self.nodes.push(id);
        }
    }

    /// Add a node if not already selected.
    pub fn add(&mut self, id: NodeId) {
        if !self.nodes.contains(&id) {
            self.nodes.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Full paths of the selected leaves, in selection order.
    ///
    /// Internal nodes are skipped: only leaves are addressable variables.
    pub fn selected_leaves<T>(&self, trie: &PathTrie<T>) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|id| trie.is_leaf(**id))
            .map(|id| trie.path_of(*id))
            .collect()
    }
}
