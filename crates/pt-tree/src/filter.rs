//! Incremental substring filtering over a trie.
//!
//! Filtering never destroys nodes: non-matching branches are detached from
//! an [`Outline`] (the displayed child lists) and their former sibling index
//! is remembered, so clearing the filter restores the exact original order.

use std::collections::BTreeSet;

use pt_core::NodeId;

use crate::trie::PathTrie;

/// Paths (internal and leaf) that remain attached after filtering.
pub type VisibleSet = BTreeSet<String>;

/// Displayed child lists, initially a copy of the trie structure.
#[derive(Debug, Clone)]
pub struct Outline {
    children: Vec<Vec<NodeId>>,
}

impl Outline {
    pub fn new<T>(trie: &PathTrie<T>) -> Self {
        // The root is not counted by `len()`.
        let children = (0..=trie.len())
            .map(|i| trie.children(NodeId::from_index(i)).to_vec())
            .collect();
        Self { children }
    }

    /// Currently attached children of `id`.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Detach `child` from `parent`, returning its former index.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> Option<usize> {
        let list = self.children.get_mut(parent.index())?;
        let index = list.iter().position(|c| *c == child)?;
        list.remove(index);
        Some(index)
    }

    /// Reattach `child` under `parent` at `index` (clamped to the list length).
    pub fn reattach(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if let Some(list) = self.children.get_mut(parent.index()) {
            if list.contains(&child) {
                return;
            }
            let index = index.min(list.len());
            list.insert(index, child);
        }
    }

    /// Every attached node reachable from the root, depth-first.
    pub fn attached(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Detached {
    node: NodeId,
    parent: NodeId,
    index: usize,
}

/// Case-sensitive substring filter with remembered detach positions.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pattern: String,
    hidden: Vec<Detached>,
    matches: Vec<NodeId>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern of the last `apply` call.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Nodes whose own name matched the last pattern.
    pub fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    /// Number of currently detached subtrees.
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    /// Apply `pattern`, returning the set of paths left visible.
    ///
    /// A node stays visible if its name contains `pattern` or any
    /// descendant stays visible. The previous filter is undone first, so
    /// applying the same pattern twice yields the same result.
    pub fn apply<T>(&mut self, trie: &PathTrie<T>, outline: &mut Outline, pattern: &str) -> VisibleSet {
        self.restore(outline);
        self.pattern = pattern.to_string();
        self.matches.clear();

        if !pattern.is_empty() {
            self.filter(trie, outline, trie.root(), pattern);
            tracing::debug!(
                pattern,
                matches = self.matches.len(),
                hidden = self.hidden.len(),
                "filter applied"
            );
        }

        outline
            .attached(trie.root())
            .into_iter()
            .map(|id| trie.path_of(id))
            .collect()
    }

    /// Reattach every hidden node in reverse detach order.
    pub fn restore(&mut self, outline: &mut Outline) {
        for d in self.hidden.drain(..).rev() {
            outline.reattach(d.parent, d.node, d.index);
        }
    }

    fn filter<T>(&mut self, trie: &PathTrie<T>, outline: &mut Outline, parent: NodeId, pattern: &str) -> bool {
        let mut any_visible = false;
        let snapshot = outline.children(parent).to_vec();
        for child in snapshot {
            let own_match = trie.name(child).contains(pattern);
            if own_match {
                self.matches.push(child);
            }
            let descendant_visible = self.filter(trie, outline, child, pattern);
            if own_match || descendant_visible {
                any_visible = true;
            } else if let Some(index) = outline.detach(parent, child) {
                self.hidden.push(Detached {
                    node: child,
                    parent,
                    index,
                });
            }
        }
        any_visible
    }
}
