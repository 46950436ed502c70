//! Fixed-step simulation engines for proptrace.
//!
//! Provides:
//! - `TransientModel` for pluggable dynamic systems
//! - Fixed-step RK4 and forward Euler integrators
//! - `ModelEngine`, exposing any `PropertyModel` through `SimEngine`
//! - A point-mass ballistic demo model

pub mod ballistic;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod model;

// Re-exports for public API
pub use ballistic::BallisticModel;
pub use engine::{IntegratorType, ModelEngine};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::{PropertyModel, TransientModel};
