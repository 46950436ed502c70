//! Session-level scenarios: drag binding, run loop, reinitialisation and
//! config files.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use pt_app::{
    AppError, DropOutcome, InspectorConfig, Session, load_config, load_config_or_default,
    save_config,
};
use pt_core::VarPath;
use pt_engine::MemoryEngine;
use pt_plot::{BindOutcome, FrameKind, Pos, RecordingLayer, Rect};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn var(s: &str) -> VarPath {
    VarPath::parse(s).unwrap()
}

fn engine() -> MemoryEngine {
    MemoryEngine::new(0.1)
        .with_variable("a/b", 1.0, true)
        .with_variable("a/c", 10.0, true)
        .with_variable("z/y/x", 0.0, false)
        .with_rate("a/b", 1.0)
        .with_rate("a/c", -0.5)
}

/// Session whose plot surface sits to the right of a 200 px tree panel.
fn session() -> Session<MemoryEngine> {
    let mut s = Session::new(engine(), InspectorConfig::default()).unwrap();
    s.surface_mut()
        .set_bounds(Rect::from_min_size(Pos::new(200.0, 0.0), 600.0, 436.0));
    s
}

fn select(s: &mut Session<MemoryEngine>, paths: &[&str]) {
    let ids: Vec<_> = paths
        .iter()
        .map(|p| s.catalog().tree().find_leaf(p).unwrap())
        .collect();
    let tree = s.tree_mut();
    tree.selection.clear();
    for id in ids {
        tree.selection.add(id);
    }
}

fn drag_to(s: &mut Session<MemoryEngine>, drop: Pos) -> Option<DropOutcome> {
    s.pointer_down(Pos::new(20.0, 12.0), Pos::new(0.0, 8.0));
    s.pointer_move(Pos::new(60.0, 40.0));
    s.pointer_move(drop);
    s.pointer_up(drop).unwrap()
}

#[test]
fn drag_to_empty_surface_creates_one_region_then_appends_without_duplicates() {
    let mut s = session();
    select(&mut s, &["a/b", "a/c"]);

    let outcome = drag_to(&mut s, Pos::new(500.0, 200.0));
    assert_eq!(
        outcome,
        Some(DropOutcome::Bind {
            region: None,
            payload: vec![var("a/b"), var("a/c")],
        })
    );
    assert_eq!(s.surface().len(), 1);
    assert_eq!(s.surface().region(0).unwrap().series(), &[var("a/b"), var("a/c")]);
    assert_eq!(s.log().variables(), &[var("a/b"), var("a/c")]);

    // Same leaves onto the region's draw area.
    let data = s.surface().region(0).unwrap().data_rect();
    let inside = Pos::new((data.min.x + data.max.x) / 2.0, (data.min.y + data.max.y) / 2.0);
    let outcome = drag_to(&mut s, inside);
    assert!(matches!(
        outcome,
        Some(DropOutcome::Bind { region: Some(0), .. })
    ));
    assert_eq!(s.surface().len(), 1);
    assert_eq!(s.surface().region(0).unwrap().series(), &[var("a/b"), var("a/c")]);
    assert_eq!(s.log().len(), 2);
}

#[test]
fn selection_order_is_plot_order() {
    let mut s = session();
    select(&mut s, &["a/c", "a/b"]);
    drag_to(&mut s, Pos::new(500.0, 200.0));
    assert_eq!(s.surface().region(0).unwrap().series(), &[var("a/c"), var("a/b")]);
}

#[test]
fn drop_outside_surface_changes_nothing() {
    let mut s = session();
    select(&mut s, &["a/b"]);
    assert_eq!(drag_to(&mut s, Pos::new(100.0, 100.0)), Some(DropOutcome::Discarded));
    assert!(s.surface().is_empty());
    assert!(s.log().is_empty());
}

#[test]
fn drop_on_new_region_strip_adds_a_second_region() {
    let mut s = session();
    select(&mut s, &["a/b"]);
    drag_to(&mut s, Pos::new(500.0, 200.0));
    select(&mut s, &["a/c"]);
    let strip = s.surface().new_region_rect();
    drag_to(&mut s, Pos::new(500.0, strip.max.y - 2.0));
    assert_eq!(s.surface().len(), 2);
    assert_eq!(s.surface().region(1).unwrap().series(), &[var("a/c")]);
}

#[test]
fn internal_node_selection_is_a_click() {
    let mut s = session();
    let id = s.catalog().tree().find("z/y").unwrap();
    s.tree_mut().selection.select(id);
    assert_eq!(drag_to(&mut s, Pos::new(500.0, 200.0)), Some(DropOutcome::Click));
    assert!(s.surface().is_empty());
}

#[test]
fn five_steps_append_the_engine_reads() {
    let mut s = session();
    s.bind(None, &[var("a/b")]).unwrap();
    let before = s.log().history_of("a/b").unwrap().len();
    let mut reads = Vec::new();
    for _ in 0..5 {
        s.step_once().unwrap();
        reads.push(s.read_value("a/b").unwrap());
    }
    let history = s.log().history_of("a/b").unwrap();
    assert_eq!(history.len(), before + 5);
    assert_eq!(&history[before..], reads.as_slice());
    assert!((s.sim_time() - 0.5).abs() < 1e-12);
    assert_eq!(s.log().last_time(), Some(0.5));
}

#[test]
fn late_binding_backfills_and_rows_stay_aligned() {
    let mut s = session();
    s.bind(None, &[var("a/b")]).unwrap();
    for _ in 0..3 {
        s.step_once().unwrap();
    }
    assert_eq!(s.bind(Some(0), &[var("a/c")]).unwrap(), BindOutcome::Appended { region: 0, added: 1 });
    s.step_once().unwrap();

    let b = s.log().history_of("a/b").unwrap();
    let c = s.log().history_of("a/c").unwrap();
    assert_eq!(b.len(), c.len());
    assert!(c[..3].iter().all(|v| v.is_nan()));
    assert_eq!(&c[3..], &[8.5, 8.0]);
}

#[test]
fn initialize_truncates_history_to_reset_state() {
    let mut s = session();
    s.bind(None, &[var("a/b"), var("a/c")]).unwrap();
    for _ in 0..4 {
        s.step_once().unwrap();
    }
    s.initialize().unwrap();
    assert_eq!(s.log().ncol(), 1);
    assert_eq!(s.log().history_of("a/b").unwrap(), &[1.0]);
    assert_eq!(s.log().history_of("a/c").unwrap(), &[10.0]);
    assert_eq!(s.sim_time(), 0.0);
    assert!(!s.surface().compositor().is_valid());
}

#[test]
fn run_poll_pause() {
    let mut s = session();
    let t0 = Instant::now();
    let tick = s.config().tick_interval();

    assert_eq!(s.poll(t0 + tick).unwrap(), 0);
    s.run(t0);
    assert!(s.is_running());
    assert_eq!(s.poll(t0).unwrap(), 0);
    assert_eq!(s.poll(t0 + tick).unwrap(), 10);
    assert!((s.sim_time() - 1.0).abs() < 1e-9);

    assert!(s.pause());
    assert!(!s.pause());
    assert_eq!(s.poll(t0 + tick * 3).unwrap(), 0);
}

#[test]
fn deleting_a_series_keeps_its_history() {
    let mut s = session();
    s.bind(None, &[var("a/b")]).unwrap();
    s.step_once().unwrap();
    s.surface_mut().select(Some(pt_plot::SeriesRef { region: 0, series: 0 }));
    assert_eq!(s.delete_selected(), Some(var("a/b")));
    assert!(s.surface().is_empty());
    assert_eq!(s.log().history_of("a/b").unwrap().len(), 2);
}

#[test]
fn render_after_bind_is_full_then_blits() {
    let mut s = session();
    s.bind(None, &[var("a/b")]).unwrap();
    let mut layer = RecordingLayer::new();
    assert_eq!(s.render(&mut layer), FrameKind::Full);
    assert!(layer.texts().contains(&"a/b"));
    assert_eq!(s.render(&mut layer), FrameKind::Blit);
}

#[test]
fn search_reveals_matches() {
    let mut s = session();
    let visible = s.search("x");
    assert!(visible.contains("z/y/x"));
    assert!(!visible.contains("a/b"));
    let rows = s.tree().rows(s.catalog().tree());
    assert!(rows.iter().any(|r| r.name == "x"));

    s.collapse_all();
    let visible = s.search("");
    assert!(visible.contains("a/b"));
}

#[test]
fn config_round_trip_through_yaml() {
    let dir = unique_temp_dir("pt_app_config");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("inspector.yaml");

    let config = InspectorConfig {
        steps_per_tick: 4,
        zoom_base: 2.0,
        ..Default::default()
    };
    save_config(&path, &config).unwrap();
    assert_eq!(load_config(&path).unwrap(), config);

    fs::write(&path, "zoom_base: 0.5\n").unwrap();
    assert!(matches!(load_config(&path), Err(AppError::Config(_))));

    let missing = dir.join("missing.yaml");
    assert_eq!(
        load_config_or_default(Some(&missing)).unwrap(),
        InspectorConfig::default()
    );
    assert!(matches!(
        load_config(&missing),
        Err(AppError::ConfigFileRead { .. })
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn tick_interval_follows_config() {
    let config = InspectorConfig {
        tick_interval_ms: 40,
        ..Default::default()
    };
    assert_eq!(config.tick_interval(), Duration::from_millis(40));
}
