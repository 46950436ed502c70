//! Display state for a trie: filtering, expansion and flattened rows.

use std::collections::HashSet;

use pt_core::NodeId;

use crate::filter::{Outline, SearchFilter, VisibleSet};
use crate::selection::TreeSelection;
use crate::trie::PathTrie;

/// One visible line of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub id: NodeId,
    pub name: &'a str,
    /// Segment depth, used for indentation.
    pub depth: usize,
    pub is_leaf: bool,
    pub has_children: bool,
    pub expanded: bool,
}

/// Everything a front end needs to render and interact with the tree.
///
/// The trie is the model; the view only holds display state, so one trie
/// can back several views.
#[derive(Debug, Clone)]
pub struct TreeView {
    outline: Outline,
    filter: SearchFilter,
    expanded: HashSet<NodeId>,
    pub selection: TreeSelection,
}

impl TreeView {
    /// Create a view; `expand_all` opens every internal node.
    pub fn new<T>(trie: &PathTrie<T>, expand_all: bool) -> Self {
        let expanded = if expand_all {
            trie.descendants(trie.root())
                .into_iter()
                .filter(|id| !trie.children(*id).is_empty())
                .collect()
        } else {
            HashSet::new()
        };
        Self {
            outline: Outline::new(trie),
            filter: SearchFilter::new(),
            expanded,
            selection: TreeSelection::new(),
        }
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn pattern(&self) -> &str {
        self.filter.pattern()
    }

    /// Filter the view and expand the ancestors of every match.
    pub fn search<T>(&mut self, trie: &PathTrie<T>, pattern: &str) -> VisibleSet {
        let visible = self.filter.apply(trie, &mut self.outline, pattern);
        for id in self.filter.matches().to_vec() {
            self.reveal(trie, id);
        }
        visible
    }

    /// Expand every ancestor of `id` so that it is on screen.
    pub fn reveal<T>(&mut self, trie: &PathTrie<T>, id: NodeId) {
        let mut cursor = trie.node(id).and_then(|n| n.parent());
        while let Some(parent) = cursor {
            if parent == trie.root() {
                break;
            }
            self.expanded.insert(parent);
            cursor = trie.node(parent).and_then(|n| n.parent());
        }
    }

    /// Close every node. Visibility (filtering) is untouched.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn set_expanded(&mut self, id: NodeId, open: bool) {
        if open {
            self.expanded.insert(id);
        } else {
            self.expanded.remove(&id);
        }
    }

    pub fn toggle_expanded(&mut self, id: NodeId) {
        let open = !self.is_expanded(id);
        self.set_expanded(id, open);
    }

    /// Visible rows in display order, honouring filter and expansion.
    pub fn rows<'a, T>(&self, trie: &'a PathTrie<T>) -> Vec<Row<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .outline
            .children(trie.root())
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            let Some(node) = trie.node(id) else {
                continue;
            };
            let attached = self.outline.children(id);
            let expanded = self.is_expanded(id);
            out.push(Row {
                id,
                name: node.name.as_str(),
                depth: node.depth(),
                is_leaf: node.is_leaf(),
                has_children: !attached.is_empty(),
                expanded,
            });
            if expanded {
                stack.extend(attached.iter().rev().copied());
            }
        }
        out
    }

    /// Selected leaf paths in selection order.
    pub fn selected_leaves<T>(&self, trie: &PathTrie<T>) -> Vec<String> {
        self.selection.selected_leaves(trie)
    }
}
