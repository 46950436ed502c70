//! ModelEngine driving the ballistic demo through the SimEngine interface.

use pt_engine::{EngineError, PropertyCatalog, SimEngine};
use pt_sim::{BallisticModel, IntegratorType, ModelEngine};

fn engine() -> ModelEngine<BallisticModel> {
    ModelEngine::new(BallisticModel::default(), 0.01).unwrap()
}

#[test]
fn rejects_non_positive_dt() {
    assert!(ModelEngine::new(BallisticModel::default(), 0.0).is_err());
    assert!(ModelEngine::new(BallisticModel::default(), f64::NAN).is_err());
}

#[test]
fn steps_advance_time_and_state() {
    let mut engine = engine();
    let h0 = engine.read_value("position/h-m").unwrap();
    for _ in 0..100 {
        engine.step().unwrap();
    }
    assert!((engine.sim_time() - 1.0).abs() < 1e-9);
    assert_eq!(engine.read_value("simulation/frame").unwrap(), 100.0);
    assert!(engine.read_value("position/x-m").unwrap() > 100.0);
    // Climbing initially: w0 = 60 m/s
    assert!(engine.read_value("position/h-m").unwrap() > h0);
}

#[test]
fn reset_restores_initial_conditions() {
    let mut engine = engine();
    engine.write_value("ic/h-m", 500.0).unwrap();
    for _ in 0..10 {
        engine.step().unwrap();
    }
    engine.reset().unwrap();
    assert_eq!(engine.sim_time(), 0.0);
    assert_eq!(engine.read_value("position/h-m").unwrap(), 500.0);
    assert_eq!(engine.read_value("position/x-m").unwrap(), 0.0);
}

#[test]
fn write_access_follows_the_model() {
    let mut engine = engine();
    assert_eq!(
        engine.write_value("aero/qbar-pa", 1.0),
        Err(EngineError::ReadOnly {
            path: "aero/qbar-pa".into()
        })
    );
    assert_eq!(
        engine.write_value("simulation/sim-time-sec", 1.0),
        Err(EngineError::ReadOnly {
            path: "simulation/sim-time-sec".into()
        })
    );
    assert!(matches!(
        engine.write_value("nope", 1.0),
        Err(EngineError::UnknownPath { .. })
    ));
    engine.write_value("aero/coefficient/CD", 0.3).unwrap();
    assert_eq!(engine.read_value("aero/coefficient/CD").unwrap(), 0.3);
}

#[test]
fn integrators_agree_roughly() {
    let mut rk4 = engine();
    let mut euler = engine().with_integrator(IntegratorType::ForwardEuler);
    for _ in 0..50 {
        rk4.step().unwrap();
        euler.step().unwrap();
    }
    let a = rk4.read_value("position/h-m").unwrap();
    let b = euler.read_value("position/h-m").unwrap();
    assert!((a - b).abs() < 1.0);
}

#[test]
fn catalog_builds_from_model_engine() {
    let catalog = PropertyCatalog::build_from_engine(engine()).unwrap();
    assert!(catalog.tree().find("aero/coefficient").is_some());
    assert!(catalog.is_writable("inertia/mass-kg").unwrap());
    assert!(!catalog.is_writable("simulation/sim-time-sec").unwrap());
}

#[test]
fn non_physical_parameters_fail_the_step() {
    let mut engine = engine();
    engine.write_value("inertia/mass-kg", 0.0).unwrap();
    assert!(matches!(engine.step(), Err(EngineError::Backend { .. })));
    assert_eq!(engine.sim_time(), 0.0);
}
