//! Log behaviour as seen by the run loop.

use std::cell::Cell;
use std::convert::Infallible;

use pt_core::VarPath;
use pt_log::TimeSeriesLog;

fn var(s: &str) -> VarPath {
    VarPath::parse(s).unwrap()
}

#[test]
fn five_steps_append_the_five_reads_in_order() {
    let engine_value = Cell::new(10.0);
    let read = |_: &VarPath| Ok::<_, Infallible>(engine_value.get());

    let mut log = TimeSeriesLog::new(0.1);
    log.bind(&[var("fcs/elevator-cmd-norm")], read).unwrap();
    log.step(read).unwrap();
    let prior = log.history_of("fcs/elevator-cmd-norm").unwrap().len();

    let mut expected = Vec::new();
    for k in 0..5 {
        engine_value.set(k as f64 * 1.5 - 2.0);
        expected.push(engine_value.get());
        log.step(read).unwrap();
    }

    let history = log.history_of("fcs/elevator-cmd-norm").unwrap();
    assert_eq!(history.len(), prior + 5);
    assert_eq!(&history[prior..], expected.as_slice());
}

#[test]
fn k_steps_after_n_bindings_grow_every_row_by_k() {
    let mut log = TimeSeriesLog::new(0.1);
    let zero = |_: &VarPath| Ok::<_, Infallible>(0.0);
    log.bind(&[var("a/b"), var("a/c")], zero).unwrap();
    log.step(zero).unwrap();
    log.bind(&[var("d")], zero).unwrap();

    let initial = log.ncol();
    for _ in 0..7 {
        log.step(zero).unwrap();
    }
    for path in ["a/b", "a/c", "d"] {
        assert_eq!(log.history_of(path).unwrap().len(), initial + 7);
    }
}

#[test]
fn rows_survive_rebinding_after_reinit() {
    let mut log = TimeSeriesLog::new(0.1);
    let one = |_: &VarPath| Ok::<_, Infallible>(1.0);
    log.bind(&[var("a")], one).unwrap();
    log.step(one).unwrap();
    log.reinit(one).unwrap();
    log.bind(&[var("a")], one).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.history_of("a").unwrap(), &[1.0]);
}
