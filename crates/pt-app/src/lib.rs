//! Shared application layer for proptrace.
//!
//! Both front ends drive a [`Session`]: it owns the property catalog, the
//! tree view, the sample log and the plot surface, and routes pointer input
//! through the [`DragBinding`] state machine.

pub mod config;
pub mod demo;
pub mod drag;
pub mod error;
pub mod session;
pub mod timer;

// Re-export key types for convenience
pub use config::{InspectorConfig, load_config, load_config_or_default, save_config};
pub use demo::{DemoEngine, demo_engine};
pub use drag::{DragBinding, DragPreview, DragState, DropOutcome};
pub use error::{AppError, AppResult};
pub use session::Session;
pub use timer::RunTimer;
