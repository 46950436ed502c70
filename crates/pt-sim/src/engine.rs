//! `SimEngine` adapter for property models.

use pt_engine::{EngineError, EngineResult, SimEngine, VariableInfo};

use crate::error::SimError;
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::PropertyModel;

const SIM_TIME: &str = "simulation/sim-time-sec";
const SIM_DT: &str = "simulation/dt-sec";
const SIM_FRAME: &str = "simulation/frame";

/// Integrator selection for stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Steps a [`PropertyModel`] with a fixed time step and exposes it as a
/// [`SimEngine`].
///
/// Adds read-only `simulation/*` bookkeeping variables to the model's own.
pub struct ModelEngine<M: PropertyModel> {
    model: M,
    integrator: IntegratorType,
    dt: f64,
    t: f64,
    frame: u64,
    x: M::State,
    writable: Vec<String>,
}

impl<M: PropertyModel> ModelEngine<M> {
    pub fn new(model: M, dt: f64) -> Result<Self, SimError> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        let x = model.initial_state();
        let writable = model
            .properties()
            .into_iter()
            .filter(|p| p.writable)
            .map(|p| p.path)
            .collect();
        Ok(Self {
            model,
            integrator: IntegratorType::default(),
            dt,
            t: 0.0,
            frame: 0,
            x,
            writable,
        })
    }

    pub fn with_integrator(mut self, integrator: IntegratorType) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn state(&self) -> &M::State {
        &self.x
    }

    fn unknown(path: &str) -> EngineError {
        EngineError::UnknownPath {
            path: path.to_string(),
        }
    }
}

impl<M: PropertyModel> SimEngine for ModelEngine<M> {
    fn list_variables(&self) -> Vec<VariableInfo> {
        let mut vars = self.model.properties();
        vars.push(VariableInfo::new(SIM_TIME, false));
        vars.push(VariableInfo::new(SIM_DT, false));
        vars.push(VariableInfo::new(SIM_FRAME, false));
        vars
    }

    fn read_value(&self, path: &str) -> EngineResult<f64> {
        match path {
            SIM_TIME => Ok(self.t),
            SIM_DT => Ok(self.dt),
            SIM_FRAME => Ok(self.frame as f64),
            _ => self
                .model
                .get(&self.x, path)
                .ok_or_else(|| Self::unknown(path)),
        }
    }

    fn write_value(&mut self, path: &str, value: f64) -> EngineResult<()> {
        if !self.writable.iter().any(|p| p == path) {
            return if self.read_value(path).is_ok() {
                Err(EngineError::ReadOnly {
                    path: path.to_string(),
                })
            } else {
                Err(Self::unknown(path))
            };
        }
        if self.model.set(&mut self.x, path, value) {
            Ok(())
        } else {
            Err(Self::unknown(path))
        }
    }

    fn step(&mut self) -> EngineResult<()> {
        self.x = match self.integrator {
            IntegratorType::RK4 => RK4.step(&mut self.model, self.t, &self.x, self.dt)?,
            IntegratorType::ForwardEuler => {
                ForwardEuler.step(&mut self.model, self.t, &self.x, self.dt)?
            }
        };
        self.frame += 1;
        self.t = self.frame as f64 * self.dt;
        Ok(())
    }

    fn reset(&mut self) -> EngineResult<()> {
        self.x = self.model.initial_state();
        self.t = 0.0;
        self.frame = 0;
        tracing::debug!("model engine reset to initial conditions");
        Ok(())
    }

    fn delta_t(&self) -> f64 {
        self.dt
    }

    fn sim_time(&self) -> f64 {
        self.t
    }
}
