//! Catalog behaviour against a larger engine catalog.

use pt_engine::{EngineError, MemoryEngine, PropertyCatalog, SimEngine};

fn engine() -> MemoryEngine {
    let mut engine = MemoryEngine::new(1.0 / 120.0);
    for i in 0..500 {
        engine = engine.with_variable(format!("aero/coefficient/C{i:03}"), i as f64, false);
    }
    engine
        .with_variable("fcs/elevator-cmd-norm", 0.0, true)
        .with_variable("simulation/sim-time-sec", 0.0, false)
        .with_rate("simulation/sim-time-sec", 1.0 / 120.0)
}

#[test]
fn build_from_engine_places_every_variable() {
    let cat = PropertyCatalog::build_from_engine(engine()).unwrap();
    assert_eq!(cat.len(), 502);
    assert_eq!(cat.variables().count(), 502);
    assert!(cat.is_writable("fcs/elevator-cmd-norm").unwrap());
    assert!(!cat.is_writable("aero/coefficient/C042").unwrap());
}

#[test]
fn edits_are_visible_to_the_next_read() {
    let mut cat = PropertyCatalog::build_from_engine(engine()).unwrap();
    cat.write_value("fcs/elevator-cmd-norm", -0.25).unwrap();
    assert_eq!(cat.read_value("fcs/elevator-cmd-norm").unwrap(), -0.25);
}

#[test]
fn stepping_through_the_catalog_advances_the_engine() {
    let mut cat = PropertyCatalog::build_from_engine(engine()).unwrap();
    for _ in 0..120 {
        cat.step().unwrap();
    }
    let t = cat.read_value("simulation/sim-time-sec").unwrap();
    assert!((t - 1.0).abs() < 1e-9);
    assert!((cat.engine().sim_time() - 1.0).abs() < 1e-9);

    cat.reset().unwrap();
    assert_eq!(cat.read_value("simulation/sim-time-sec").unwrap(), 0.0);
}

#[test]
fn invalid_engine_paths_fail_the_build() {
    let engine = MemoryEngine::new(0.1).with_variable("bad//path", 0.0, false);
    assert!(matches!(
        PropertyCatalog::build_from_engine(engine),
        Err(EngineError::InvalidCatalog { .. })
    ));
}
