//! Interface to the external simulation.

use crate::error::EngineResult;

/// One entry of the engine's flat variable catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub path: String,
    pub writable: bool,
}

impl VariableInfo {
    pub fn new(path: impl Into<String>, writable: bool) -> Self {
        Self {
            path: path.into(),
            writable,
        }
    }
}

/// A stepped simulation exposing addressable scalar variables.
///
/// Implementations are driven from a single thread; nothing here needs to
/// be `Send`.
pub trait SimEngine {
    /// Flat catalog of every addressable variable.
    fn list_variables(&self) -> Vec<VariableInfo>;

    /// Current value of `path`; fails with `UnknownPath` if absent.
    fn read_value(&self, path: &str) -> EngineResult<f64>;

    /// Overwrite `path`; fails with `ReadOnly` if not writable.
    fn write_value(&mut self, path: &str, value: f64) -> EngineResult<()>;

    /// Advance the simulation by one time step.
    fn step(&mut self) -> EngineResult<()>;

    /// Reinitialize the simulation to its initial conditions.
    fn reset(&mut self) -> EngineResult<()>;

    /// Fixed time step in seconds.
    fn delta_t(&self) -> f64;

    /// Current simulation time in seconds.
    fn sim_time(&self) -> f64;
}
