//! Arena-backed path trie.

use pt_core::{NodeId, VarPath};

use crate::error::TreeResult;

/// A node of the trie.
///
/// Children are kept sorted by segment name so that display order is
/// lexicographic regardless of insertion order.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) payload: Option<T>,
    pub(crate) is_leaf: bool,
    pub(crate) depth: usize,
}

impl<T> Node<T> {
    fn new(name: String, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            payload: None,
            is_leaf: false,
            depth,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// True iff this exact path was inserted (never implied by descendants).
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Segment depth; top-level segments have depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Hierarchical container keyed by slash-separated names.
///
/// Construction reuses shared prefix nodes, so building from N paths costs
/// one descent per segment. Node 0 is an unnamed root that is never rendered.
#[derive(Debug, Clone)]
pub struct PathTrie<T> {
    nodes: Vec<Node<T>>,
    leaf_count: usize,
}

impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathTrie<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(String::new(), None, 0)],
            leaf_count: 0,
        }
    }

    /// Build from `(path, payload)` pairs.
    pub fn from_entries<I, S>(entries: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for (path, payload) in entries {
            trie.insert(path.as_ref(), payload)?;
        }
        Ok(trie)
    }

    /// Id of the unnamed root.
    pub fn root(&self) -> NodeId {
        NodeId::from_index(0)
    }

    /// Total node count, excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Display name of a node ("" for the root or an unknown id).
    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.name.as_str()).unwrap_or("")
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.is_leaf)
    }

    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.node(id).and_then(|n| n.payload.as_ref())
    }

    /// Insert a path, creating missing prefix nodes.
    ///
    /// Re-inserting an existing path only replaces its payload.
    pub fn insert(&mut self, path: &str, payload: T) -> TreeResult<NodeId> {
        let path = VarPath::parse(path)?;
        let mut current = self.root();
        for (depth, segment) in path.segments().enumerate() {
            current = self.child_or_insert(current, segment, depth);
        }
        let node = &mut self.nodes[current.index()];
        if !node.is_leaf {
            node.is_leaf = true;
            self.leaf_count += 1;
        }
        node.payload = Some(payload);
        Ok(current)
    }

    fn child_or_insert(&mut self, parent: NodeId, segment: &str, depth: usize) -> NodeId {
        let search = {
            let nodes = &self.nodes;
            nodes[parent.index()]
                .children
                .binary_search_by(|c| nodes[c.index()].name.as_str().cmp(segment))
        };
        match search {
            Ok(pos) => self.nodes[parent.index()].children[pos],
            Err(pos) => {
                let id = NodeId::from_index(self.nodes.len());
                self.nodes
                    .push(Node::new(segment.to_string(), Some(parent), depth));
                self.nodes[parent.index()].children.insert(pos, id);
                id
            }
        }
    }

    fn child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        let children = &self.nodes[parent.index()].children;
        children
            .binary_search_by(|c| self.nodes[c.index()].name.as_str().cmp(segment))
            .ok()
            .map(|pos| children[pos])
    }

    /// Resolve a path to its node (leaf or internal).
    pub fn find(&self, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return None;
        }
        let mut current = self.root();
        for segment in path.split(pt_core::path::SEPARATOR) {
            current = self.child(current, segment)?;
        }
        Some(current)
    }

    /// Resolve a path to a leaf node; internal nodes yield `None`.
    pub fn find_leaf(&self, path: &str) -> Option<NodeId> {
        self.find(path).filter(|id| self.is_leaf(*id))
    }

    /// Reconstruct the full path of a node by walking up to the root.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                break;
            };
            if node.parent.is_none() {
                break;
            }
            segments.push(node.name.as_str());
            cursor = node.parent;
        }
        segments.reverse();
        segments.join("/")
    }

    /// Every node below `id` in display order (depth-first, pre-order).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Leaf node ids in display order.
    pub fn leaf_ids(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.is_leaf(*id))
            .collect()
    }

    /// All leaf paths in ascending lexicographic order.
    pub fn leaves(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .leaf_ids()
            .into_iter()
            .map(|id| self.path_of(id))
            .collect();
        // Segment order and whole-string order differ when a segment is a
        // prefix of a sibling ("a/b" vs "a-c"), hence the final sort.
        paths.sort_unstable();
        paths
    }
}

impl PathTrie<()> {
    /// Build a payload-less trie from plain paths.
    pub fn from_leaves<I, S>(paths: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_entries(paths.into_iter().map(|p| (p, ())))
    }
}
