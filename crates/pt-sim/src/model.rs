//! Model traits for pluggable dynamic systems.

use pt_engine::VariableInfo;

use crate::error::SimResult;

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Scalar field arithmetic for integration: add states, scale by scalar
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Takes &mut self so models may cache intermediate results.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}

/// A model whose states, parameters and outputs are addressable by path.
pub trait PropertyModel: TransientModel {
    /// Every path the model answers to, with write access.
    fn properties(&self) -> Vec<VariableInfo>;

    /// Value of `path` for state `x`; `None` if the model has no such path.
    fn get(&self, x: &Self::State, path: &str) -> Option<f64>;

    /// Write `path`, either into the state or into a model parameter.
    ///
    /// Returns `false` if the path is unknown or not writable.
    fn set(&mut self, x: &mut Self::State, path: &str, value: f64) -> bool;
}
