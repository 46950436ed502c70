//! Point-mass ballistic model with quadratic drag.
//!
//! State `[x, h, u, w]`: downrange distance, altitude, horizontal and
//! vertical velocity (SI units). Air density follows an exponential
//! atmosphere. Once the body reaches the ground moving downwards it stays
//! there.

use nalgebra::Vector4;
use pt_engine::VariableInfo;

use crate::error::{SimError, SimResult};
use crate::model::{PropertyModel, TransientModel};

const G: f64 = 9.80665;
const RHO0: f64 = 1.225;
const SCALE_HEIGHT_M: f64 = 8500.0;

pub type BallisticState = Vector4<f64>;

#[derive(Debug, Clone)]
pub struct BallisticModel {
    pub mass_kg: f64,
    pub cd: f64,
    pub ref_area_m2: f64,
    pub h0_m: f64,
    pub u0_mps: f64,
    pub w0_mps: f64,
}

impl Default for BallisticModel {
    fn default() -> Self {
        Self {
            mass_kg: 5.0,
            cd: 0.47,
            ref_area_m2: 0.0314,
            h0_m: 1000.0,
            u0_mps: 120.0,
            w0_mps: 60.0,
        }
    }
}

impl BallisticModel {
    fn density(h: f64) -> f64 {
        RHO0 * (-h.max(0.0) / SCALE_HEIGHT_M).exp()
    }

    fn speed(x: &BallisticState) -> f64 {
        x[2].hypot(x[3])
    }

    fn qbar(x: &BallisticState) -> f64 {
        0.5 * Self::density(x[1]) * Self::speed(x).powi(2)
    }

    fn drag(&self, x: &BallisticState) -> f64 {
        Self::qbar(x) * self.ref_area_m2 * self.cd
    }

    fn grounded(x: &BallisticState) -> bool {
        x[1] <= 0.0 && x[3] <= 0.0
    }

    fn derivatives(&self, x: &BallisticState) -> SimResult<BallisticState> {
        if !(self.mass_kg > 0.0) {
            return Err(SimError::NonPhysical {
                what: "mass must be positive",
            });
        }
        if Self::grounded(x) {
            return Ok(BallisticState::zeros());
        }
        let v = Self::speed(x);
        let (ax, az) = if v > f64::EPSILON {
            let d_over_m = self.drag(x) / self.mass_kg;
            (-d_over_m * x[2] / v, -G - d_over_m * x[3] / v)
        } else {
            (0.0, -G)
        };
        Ok(BallisticState::new(x[2], x[3], ax, az))
    }
}

impl TransientModel for BallisticModel {
    type State = BallisticState;

    fn initial_state(&self) -> BallisticState {
        BallisticState::new(0.0, self.h0_m, self.u0_mps, self.w0_mps)
    }

    fn rhs(&mut self, _t: f64, x: &BallisticState) -> SimResult<BallisticState> {
        self.derivatives(x)
    }

    fn add(&self, a: &BallisticState, b: &BallisticState) -> BallisticState {
        a + b
    }

    fn scale(&self, a: &BallisticState, scale: f64) -> BallisticState {
        a * scale
    }
}

impl PropertyModel for BallisticModel {
    fn properties(&self) -> Vec<VariableInfo> {
        [
            ("position/x-m", true),
            ("position/h-m", true),
            ("velocities/u-mps", true),
            ("velocities/w-mps", true),
            ("velocities/vt-mps", false),
            ("velocities/gamma-deg", false),
            ("accelerations/udot-mps2", false),
            ("accelerations/wdot-mps2", false),
            ("atmosphere/rho-kgm3", false),
            ("aero/qbar-pa", false),
            ("aero/drag-n", false),
            ("aero/coefficient/CD", true),
            ("metrics/Sw-m2", true),
            ("inertia/mass-kg", true),
            ("ic/h-m", true),
            ("ic/u-mps", true),
            ("ic/w-mps", true),
        ]
        .into_iter()
        .map(|(path, writable)| VariableInfo::new(path, writable))
        .collect()
    }

    fn get(&self, x: &BallisticState, path: &str) -> Option<f64> {
        let value = match path {
            "position/x-m" => x[0],
            "position/h-m" => x[1],
            "velocities/u-mps" => x[2],
            "velocities/w-mps" => x[3],
            "velocities/vt-mps" => Self::speed(x),
            "velocities/gamma-deg" => x[3].atan2(x[2]).to_degrees(),
            "accelerations/udot-mps2" => self.derivatives(x).ok()?[2],
            "accelerations/wdot-mps2" => self.derivatives(x).ok()?[3],
            "atmosphere/rho-kgm3" => Self::density(x[1]),
            "aero/qbar-pa" => Self::qbar(x),
            "aero/drag-n" => self.drag(x),
            "aero/coefficient/CD" => self.cd,
            "metrics/Sw-m2" => self.ref_area_m2,
            "inertia/mass-kg" => self.mass_kg,
            "ic/h-m" => self.h0_m,
            "ic/u-mps" => self.u0_mps,
            "ic/w-mps" => self.w0_mps,
            _ => return None,
        };
        Some(value)
    }

    fn set(&mut self, x: &mut BallisticState, path: &str, value: f64) -> bool {
        match path {
            "position/x-m" => x[0] = value,
            "position/h-m" => x[1] = value,
            "velocities/u-mps" => x[2] = value,
            "velocities/w-mps" => x[3] = value,
            "aero/coefficient/CD" => self.cd = value,
            "metrics/Sw-m2" => self.ref_area_m2 = value,
            "inertia/mass-kg" => self.mass_kg = value,
            "ic/h-m" => self.h0_m = value,
            "ic/u-mps" => self.u0_mps = value,
            "ic/w-mps" => self.w0_mps = value,
            _ => return false,
        }
        true
    }
}
