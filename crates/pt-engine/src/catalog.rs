//! Property catalog: the variable tree bound to a live engine.

use pt_core::VarPath;
use pt_tree::PathTrie;

use crate::engine::SimEngine;
use crate::error::{EngineError, EngineResult};

/// A variable addressable in the catalog.
///
/// Identity is the path; values are never cached here, every read goes to
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyVariable {
    pub path: VarPath,
    pub writable: bool,
}

/// Owns the engine and the tree built from its variable catalog.
pub struct PropertyCatalog<E> {
    engine: E,
    tree: PathTrie<PropertyVariable>,
}

impl<E: SimEngine> PropertyCatalog<E> {
    /// Build the tree once from the engine's flat catalog.
    pub fn build_from_engine(engine: E) -> EngineResult<Self> {
        let mut infos = engine.list_variables();
        // Sorted input appends children at the end of each sibling list.
        infos.sort_by(|a, b| a.path.cmp(&b.path));

        let mut tree = PathTrie::new();
        for info in infos {
            let path = VarPath::parse(&info.path).map_err(|e| EngineError::InvalidCatalog {
                message: e.to_string(),
            })?;
            tree.insert(
                &info.path,
                PropertyVariable {
                    path,
                    writable: info.writable,
                },
            )?;
        }
        tracing::info!(variables = tree.leaf_count(), nodes = tree.len(), "property catalog built");
        Ok(Self { engine, tree })
    }

    pub fn tree(&self) -> &PathTrie<PropertyVariable> {
        &self.tree
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn len(&self) -> usize {
        self.tree.leaf_count()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.leaf_count() == 0
    }

    /// Resolve a path to its variable; fails unless it is a leaf.
    pub fn variable(&self, path: &str) -> EngineResult<&PropertyVariable> {
        self.tree
            .find_leaf(path)
            .and_then(|id| self.tree.payload(id))
            .ok_or_else(|| EngineError::UnknownPath {
                path: path.to_string(),
            })
    }

    /// Every variable in display order.
    pub fn variables(&self) -> impl Iterator<Item = &PropertyVariable> {
        self.tree
            .leaf_ids()
            .into_iter()
            .filter_map(|id| self.tree.payload(id))
    }

    pub fn is_writable(&self, path: &str) -> EngineResult<bool> {
        self.variable(path).map(|v| v.writable)
    }

    /// Fetch the current value from the engine.
    pub fn read_value(&self, path: &str) -> EngineResult<f64> {
        let var = self.variable(path)?;
        self.engine.read_value(var.path.as_str())
    }

    /// Write through to the engine; read-only variables are rejected
    /// before the engine is touched.
    pub fn write_value(&mut self, path: &str, value: f64) -> EngineResult<()> {
        let var = self.variable(path)?;
        if !var.writable {
            tracing::warn!(path, "rejected write to read-only property");
            return Err(EngineError::ReadOnly {
                path: path.to_string(),
            });
        }
        self.engine.write_value(path, value)?;
        tracing::debug!(path, value, "property written");
        Ok(())
    }

    pub fn step(&mut self) -> EngineResult<()> {
        self.engine.step()
    }

    pub fn reset(&mut self) -> EngineResult<()> {
        self.engine.reset()
    }

    pub fn delta_t(&self) -> f64 {
        self.engine.delta_t()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEngine;

    fn catalog() -> PropertyCatalog<MemoryEngine> {
        let engine = MemoryEngine::new(0.1)
            .with_variable("a/c", 2.0, true)
            .with_variable("a/b", 0.0, true)
            .with_variable("c/d/e", 4.0, false);
        PropertyCatalog::build_from_engine(engine).unwrap()
    }

    #[test]
    fn tree_mirrors_engine_catalog() {
        let cat = catalog();
        assert_eq!(cat.len(), 3);
        assert_eq!(cat.tree().leaves(), vec!["a/b", "a/c", "c/d/e"]);
    }

    #[test]
    fn read_resolves_leaves_only() {
        let cat = catalog();
        assert_eq!(cat.read_value("c/d/e").unwrap(), 4.0);
        assert_eq!(
            cat.read_value("c/d"),
            Err(EngineError::UnknownPath { path: "c/d".into() })
        );
    }

    #[test]
    fn write_rejects_read_only_without_mutation() {
        let mut cat = catalog();
        assert_eq!(
            cat.write_value("c/d/e", 1.0),
            Err(EngineError::ReadOnly {
                path: "c/d/e".into()
            })
        );
        assert_eq!(cat.read_value("c/d/e").unwrap(), 4.0);
        // The engine itself is only reachable read-only.
        assert_eq!(cat.engine().read_value("c/d/e").unwrap(), 4.0);

        cat.write_value("a/b", 7.5).unwrap();
        assert_eq!(cat.read_value("a/b").unwrap(), 7.5);
    }

    #[test]
    fn write_unknown_path_fails() {
        let mut cat = catalog();
        assert!(matches!(
            cat.write_value("x/y", 1.0),
            Err(EngineError::UnknownPath { .. })
        ));
    }
}
