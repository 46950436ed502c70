//! pt-tree: hierarchical variable namespace for proptrace.
//!
//! Provides:
//! - `PathTrie<T>`: arena trie keyed by slash-separated paths
//! - `Outline` + `SearchFilter`: detach/reattach filtering that preserves order
//! - `TreeSelection`: ordered multi-selection of nodes
//! - `TreeView`: expansion state and flattened rows for rendering
//!
//! # Example
//!
//! ```
//! use pt_tree::{PathTrie, TreeView};
//!
//! let trie = PathTrie::from_leaves(["a/c", "a/b", "c/d/e"]).unwrap();
//! assert_eq!(trie.leaves(), vec!["a/b", "a/c", "c/d/e"]);
//!
//! let mut view = TreeView::new(&trie, true);
//! let visible = view.search(&trie, "d");
//! assert!(visible.contains("c/d/e"));
//! assert!(!visible.contains("a/b"));
//! ```

pub mod error;
pub mod filter;
pub mod selection;
pub mod trie;
pub mod view;

// Re-exports for ergonomics
pub use error::{TreeError, TreeResult};
pub use filter::{Outline, SearchFilter, VisibleSet};
pub use selection::TreeSelection;
pub use trie::{Node, PathTrie};
pub use view::{Row, TreeView};
