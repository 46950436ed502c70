//! Deterministic in-memory engine.
//!
//! Every variable advances by a fixed increment per step, which makes the
//! logged history predictable. Used by tests and as a stand-in when no
//! model is loaded.

use std::collections::BTreeMap;

use crate::engine::{SimEngine, VariableInfo};
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone)]
struct Entry {
    value: f64,
    initial: f64,
    rate_per_step: f64,
    writable: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryEngine {
    dt: f64,
    steps: u64,
    entries: BTreeMap<String, Entry>,
}

impl MemoryEngine {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            steps: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Add a variable with its initial value.
    pub fn with_variable(mut self, path: impl Into<String>, value: f64, writable: bool) -> Self {
        self.entries.insert(
            path.into(),
            Entry {
                value,
                initial: value,
                rate_per_step: 0.0,
                writable,
            },
        );
        self
    }

    /// Set the per-step increment of an existing variable.
    pub fn with_rate(mut self, path: &str, rate_per_step: f64) -> Self {
        if let Some(entry) = self.entries.get_mut(path) {
            entry.rate_per_step = rate_per_step;
        }
        self
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl SimEngine for MemoryEngine {
    fn list_variables(&self) -> Vec<VariableInfo> {
        self.entries
            .iter()
            .map(|(path, e)| VariableInfo::new(path.clone(), e.writable))
            .collect()
    }

    fn read_value(&self, path: &str) -> EngineResult<f64> {
        self.entries
            .get(path)
            .map(|e| e.value)
            .ok_or_else(|| EngineError::UnknownPath {
                path: path.to_string(),
            })
    }

    fn write_value(&mut self, path: &str, value: f64) -> EngineResult<()> {
        let entry = self
            .entries
            .get_mut(path)
            .ok_or_else(|| EngineError::UnknownPath {
                path: path.to_string(),
            })?;
        if !entry.writable {
            return Err(EngineError::ReadOnly {
                path: path.to_string(),
            });
        }
        entry.value = value;
        Ok(())
    }

    fn step(&mut self) -> EngineResult<()> {
        for entry in self.entries.values_mut() {
            entry.value += entry.rate_per_step;
        }
        self.steps += 1;
        Ok(())
    }

    fn reset(&mut self) -> EngineResult<()> {
        for entry in self.entries.values_mut() {
            entry.value = entry.initial;
        }
        self.steps = 0;
        Ok(())
    }

    fn delta_t(&self) -> f64 {
        self.dt
    }

    fn sim_time(&self) -> f64 {
        self.steps as f64 * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_applies_rates_and_reset_restores() {
        let mut engine = MemoryEngine::new(0.5)
            .with_variable("a/b", 0.0, true)
            .with_variable("c/d/e", 4.0, false)
            .with_rate("a/b", 0.25)
            .with_rate("c/d/e", -0.1);
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.read_value("a/b").unwrap(), 0.5);
        assert!((engine.read_value("c/d/e").unwrap() - 3.8).abs() < 1e-12);
        assert_eq!(engine.sim_time(), 1.0);

        engine.reset().unwrap();
        assert_eq!(engine.read_value("a/b").unwrap(), 0.0);
        assert_eq!(engine.steps(), 0);
    }

    #[test]
    fn write_checks_access() {
        let mut engine = MemoryEngine::new(0.1).with_variable("ro", 1.0, false);
        assert!(matches!(
            engine.write_value("ro", 2.0),
            Err(EngineError::ReadOnly { .. })
        ));
        assert!(matches!(
            engine.write_value("missing", 2.0),
            Err(EngineError::UnknownPath { .. })
        ));
    }
}
