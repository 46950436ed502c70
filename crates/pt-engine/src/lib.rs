//! pt-engine: live binding between the property tree and a stepped simulation.
//!
//! The simulation itself is an external collaborator reached through the
//! [`SimEngine`] trait. [`PropertyCatalog`] is built once from the engine's
//! flat variable list and resolves reads/writes against the tree.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod memory;

pub use catalog::{PropertyCatalog, PropertyVariable};
pub use engine::{SimEngine, VariableInfo};
pub use error::{EngineError, EngineResult};
pub use memory::MemoryEngine;
