//! The inspector session: one explicit context object wiring the catalog,
//! tree view, sample log, plot surface, drag machine and run timer.
//!
//! Everything runs on the caller's thread. The front end forwards pointer
//! events and frame ticks; the session mutates its parts synchronously, so
//! a value edit is visible to the very next read.

use std::time::Instant;

use pt_core::VarPath;
use pt_core::timing::Timer;
use pt_engine::{PropertyCatalog, PropertyVariable, SimEngine};
use pt_log::TimeSeriesLog;
use pt_plot::{BindOutcome, FrameKind, PlotSurface, Pos, RenderLayer, SeriesRef};
use pt_tree::{PathTrie, TreeView, VisibleSet};

use crate::config::InspectorConfig;
use crate::drag::{DragBinding, DropOutcome};
use crate::error::{AppError, AppResult};
use crate::timer::RunTimer;

pub struct Session<E: SimEngine> {
    config: InspectorConfig,
    catalog: PropertyCatalog<E>,
    tree: TreeView,
    log: TimeSeriesLog,
    surface: PlotSurface,
    drag: DragBinding,
    timer: RunTimer,
}

impl<E: SimEngine> Session<E> {
    pub fn new(engine: E, config: InspectorConfig) -> AppResult<Self> {
        config.validate()?;
        let catalog = PropertyCatalog::build_from_engine(engine)?;
        let dt = catalog.delta_t();
        let tree = TreeView::new(catalog.tree(), false);
        Ok(Self {
            log: TimeSeriesLog::new(dt),
            surface: PlotSurface::new(dt, config.surface_options()),
            drag: DragBinding::new(config.drag_threshold_px, config.preview_max_items),
            timer: RunTimer::new(config.tick_interval()),
            tree,
            catalog,
            config,
        })
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PropertyCatalog<E> {
        &self.catalog
    }

    pub fn tree(&self) -> &TreeView {
        &self.tree
    }

    /// Expansion and selection state of the tree.
    pub fn tree_mut(&mut self) -> &mut TreeView {
        &mut self.tree
    }

    pub fn log(&self) -> &TimeSeriesLog {
        &self.log
    }

    pub fn surface(&self) -> &PlotSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PlotSurface {
        &mut self.surface
    }

    pub fn drag(&self) -> &DragBinding {
        &self.drag
    }

    pub fn timer(&self) -> &RunTimer {
        &self.timer
    }

    pub fn sim_time(&self) -> f64 {
        self.catalog.engine().sim_time()
    }

    // ---- simulation control ----

    /// Reset the engine and truncate the log to the reset state.
    pub fn initialize(&mut self) -> AppResult<()> {
        self.catalog.reset()?;
        let dt = self.catalog.delta_t();
        self.log.set_dt(dt);
        let catalog = &self.catalog;
        self.log.reinit(|v| catalog.read_value(v.as_str()))?;
        self.surface.reset(dt);
        tracing::info!(dt, tracked = self.log.len(), "session initialized");
        Ok(())
    }

    /// Advance the engine one step and append one sample column.
    pub fn step_once(&mut self) -> AppResult<()> {
        let timer = Timer::start();
        let catalog = &mut self.catalog;
        if self.log.ncol() == 0 {
            // Column 0 holds the state before the first step.
            self.log.step(|v| catalog.read_value(v.as_str()))?;
        }
        catalog.step()?;
        let catalog = &self.catalog;
        self.log.step(|v| catalog.read_value(v.as_str()))?;
        self.surface.on_step(&self.log);
        if let Some(elapsed) = timer.stop() {
            self.surface.compositor().stats().step.record(elapsed);
        }
        Ok(())
    }

    /// Start the run timer.
    pub fn run(&mut self, now: Instant) {
        self.timer.start(now);
    }

    /// Stop the run timer; harmless when it is not running.
    pub fn pause(&mut self) -> bool {
        self.timer.cancel()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Perform one batch of steps if a tick is due. Returns the number of
    /// steps taken. A failing step stops the timer.
    pub fn poll(&mut self, now: Instant) -> AppResult<usize> {
        if !self.timer.due(now) {
            return Ok(0);
        }
        for taken in 0..self.config.steps_per_tick {
            if let Err(err) = self.step_once() {
                tracing::warn!(error = %err, steps = taken, "step failed, pausing");
                self.timer.cancel();
                return Err(err);
            }
        }
        Ok(self.config.steps_per_tick)
    }

    // ---- values ----

    pub fn read_value(&self, path: &str) -> AppResult<f64> {
        Ok(self.catalog.read_value(path)?)
    }

    /// Display form of a value, at the configured precision.
    pub fn format_value(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.config.value_precision)
    }

    /// Parse `text` and write it to `path`.
    ///
    /// Nothing is written unless the text is a finite number and the
    /// variable is writable.
    pub fn edit_value(&mut self, path: &str, text: &str) -> AppResult<f64> {
        let value = match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::warn!(path, input = text, "rejected non-numeric edit");
                return Err(AppError::InvalidNumber {
                    input: text.to_string(),
                });
            }
        };
        self.catalog.write_value(path, value)?;
        Ok(value)
    }

    // ---- tree ----

    pub fn search(&mut self, pattern: &str) -> VisibleSet {
        self.tree.search(self.catalog.tree(), pattern)
    }

    pub fn collapse_all(&mut self) {
        self.tree.collapse_all();
    }

    /// Variables of the selected tree leaves, in selection order.
    pub fn selected_vars(&self) -> Vec<VarPath> {
        selected_vars(&self.tree, self.catalog.tree())
    }

    // ---- binding ----

    /// Track `vars` in the log and plot them in `region` (a new region
    /// when `None`). A bad region index fails before anything changes.
    pub fn bind(&mut self, region: Option<usize>, vars: &[VarPath]) -> AppResult<BindOutcome> {
        if let Some(index) = region {
            if self.surface.region(index).is_none() {
                return Err(pt_plot::PlotError::RegionOutOfRange {
                    index,
                    len: self.surface.len(),
                }
                .into());
            }
        }
        let catalog = &self.catalog;
        self.log.bind(vars, |v| catalog.read_value(v.as_str()))?;
        Ok(self.surface.bind_drop(region, vars)?)
    }

    // ---- pointer input ----

    /// Press on the tree row whose top-left corner is `row_origin`.
    pub fn pointer_down(&mut self, pos: Pos, row_origin: Pos) {
        self.drag.pointer_down(pos, row_origin);
    }

    /// Pointer motion anywhere. Returns true if something needs a repaint.
    pub fn pointer_move(&mut self, pos: Pos) -> bool {
        let (tree, trie) = (&self.tree, self.catalog.tree());
        let dragged = self.drag.pointer_move(pos, || selected_vars(tree, trie));
        if self.drag.is_dragging() {
            return dragged;
        }
        self.surface.pointer_move(pos)
    }

    /// Release; a completed drop is bound immediately.
    pub fn pointer_up(&mut self, pos: Pos) -> AppResult<Option<DropOutcome>> {
        let surface = &self.surface;
        let outcome = self.drag.pointer_up(pos, |p| surface.drop_target(p));
        if let Some(DropOutcome::Bind { region, payload }) = &outcome {
            self.bind(*region, payload)?;
        }
        Ok(outcome)
    }

    /// Abort a drag, e.g. when the release happened outside the window.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.surface.pointer_leave()
    }

    pub fn click(&mut self, pos: Pos) -> Option<SeriesRef> {
        self.surface.click(pos, &self.log)
    }

    /// Remove the selected series from its plot. Its history stays logged.
    pub fn delete_selected(&mut self) -> Option<VarPath> {
        self.surface.delete_selected()
    }

    pub fn zoom(&mut self, pos: Pos, steps: f64) -> bool {
        self.surface.zoom(pos, steps, &self.log)
    }

    pub fn crosshair_index(&self) -> Option<usize> {
        self.surface.crosshair_index(&self.log)
    }

    pub fn render<L: RenderLayer + ?Sized>(&mut self, layer: &mut L) -> FrameKind {
        self.surface.render(&self.log, layer)
    }
}

fn selected_vars(tree: &TreeView, trie: &PathTrie<PropertyVariable>) -> Vec<VarPath> {
    tree.selection
        .nodes()
        .iter()
        .filter_map(|id| trie.payload(*id))
        .map(|var| var.path.clone())
        .collect()
}
