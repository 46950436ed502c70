//! Built-in demo engine used when no external engine is attached.

use pt_sim::{BallisticModel, IntegratorType, ModelEngine};

use crate::error::AppResult;

pub type DemoEngine = ModelEngine<BallisticModel>;

/// Ballistic point mass with default parameters, integrated with RK4.
pub fn demo_engine(dt: f64) -> AppResult<DemoEngine> {
    let engine = ModelEngine::new(BallisticModel::default(), dt)?.with_integrator(IntegratorType::RK4);
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_engine::SimEngine;

    #[test]
    fn demo_catalog_is_hierarchical() {
        let engine = demo_engine(0.01).unwrap();
        let vars = engine.list_variables();
        assert!(vars.iter().any(|v| v.path == "aero/coefficient/CD" && v.writable));
        assert!(vars.iter().all(|v| v.path.contains('/')));
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(demo_engine(0.0).is_err());
    }
}
