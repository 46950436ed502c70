//! The plot surface: stacked regions over one shared time axis.

use pt_core::VarPath;
use pt_log::TimeSeriesLog;

use crate::axis::{TimeAxis, ValueRange};
use crate::crosshair::{label_size, nearest_index, place_label};
use crate::error::{PlotError, PlotResult};
use crate::geometry::{Pos, Rect, distance_to_polyline};
use crate::region::{PlotRegion, SeriesRef};
use crate::render::{Artifact, Color, Compositor, FrameKind, RenderLayer, Scene, Stroke, TextRole};

const MARGIN_LEFT: f32 = 64.0;
const MARGIN_RIGHT: f32 = 12.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 22.0;
/// Height of the "new plot" drop strip below the regions.
const NEW_REGION_STRIP: f32 = 36.0;

const SERIES_WIDTH: f32 = 1.5;
const SELECTED_WIDTH: f32 = 4.0;
/// Grid cells per axis inside each data rect.
const GRID_DIVISIONS: usize = 4;

const EMPTY_HINT: &str = "Drop properties to plot";
const STRIP_HINT: &str = "Drop here for a new plot";

/// Tunables, usually filled from the inspector configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub hit_distance_px: f32,
    pub zoom_base: f64,
    pub segment_batch_limit: usize,
    pub axis_growth: f64,
    pub value_precision: usize,
    pub time_precision: usize,
    pub label_char_width_px: f32,
    pub label_line_height_px: f32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            hit_distance_px: 5.0,
            zoom_base: 1.5,
            segment_batch_limit: 256,
            axis_growth: 1.5,
            value_precision: 5,
            time_precision: 3,
            label_char_width_px: 7.0,
            label_line_height_px: 14.0,
        }
    }
}

/// What lies under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Region(usize),
    /// On the surface but not on any region.
    NewRegion,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    Appended { region: usize, added: usize },
    Created { region: usize },
    /// Nothing to bind.
    Ignored,
}

pub struct PlotSurface {
    options: SurfaceOptions,
    bounds: Rect,
    regions: Vec<PlotRegion>,
    axis: TimeAxis,
    selected: Option<SeriesRef>,
    hover: Option<Pos>,
    compositor: Compositor,
}

impl PlotSurface {
    pub fn new(dt: f64, options: SurfaceOptions) -> Self {
        Self {
            axis: TimeAxis::new(dt, options.axis_growth),
            compositor: Compositor::new(options.segment_batch_limit),
            options,
            bounds: Rect::default(),
            regions: Vec::new(),
            selected: None,
            hover: None,
        }
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn regions(&self) -> &[PlotRegion] {
        &self.regions
    }

    pub fn region(&self, index: usize) -> Option<&PlotRegion> {
        self.regions.get(index)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn selected(&self) -> Option<SeriesRef> {
        self.selected
    }

    pub fn selected_path(&self) -> Option<&VarPath> {
        let sel = self.selected?;
        self.regions.get(sel.region)?.series().get(sel.series)
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn crosshair_visible(&self) -> bool {
        self.hover.is_some()
    }

    fn invalidate(&mut self, reason: &'static str) {
        if self.compositor.is_valid() {
            tracing::debug!(reason, "plot background invalidated");
        }
        self.compositor.invalidate();
    }

    // ---- layout ----

    /// Place the surface on screen; a change re-lays out every region.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.layout();
        self.invalidate("resized");
    }

    fn strip_height(&self) -> f32 {
        NEW_REGION_STRIP.min(self.bounds.height() * 0.2).max(0.0)
    }

    /// Area below the regions that accepts drops for a new region.
    pub fn new_region_rect(&self) -> Rect {
        if self.regions.is_empty() {
            return self.bounds;
        }
        let strip = self.strip_height();
        Rect::from_min_max(
            Pos::new(self.bounds.min.x, self.bounds.max.y - strip),
            self.bounds.max,
        )
    }

    fn layout(&mut self) {
        let n = self.regions.len();
        if n == 0 {
            return;
        }
        let top = self.bounds.min.y;
        let band_h = (self.bounds.height() - self.strip_height()).max(0.0) / n as f32;
        for (i, region) in self.regions.iter_mut().enumerate() {
            region.band = Rect::from_min_size(
                Pos::new(self.bounds.min.x, top + i as f32 * band_h),
                self.bounds.width(),
                band_h,
            );
            region.data = region
                .band
                .shrink(MARGIN_LEFT, MARGIN_TOP, MARGIN_RIGHT, MARGIN_BOTTOM);
        }
    }

    /// Forget the time range, e.g. after the simulation was reinitialised.
    pub fn reset(&mut self, dt: f64) {
        self.axis.reset(dt);
        self.hover = None;
        self.invalidate("reset");
    }

    // ---- binding ----

    pub fn drop_target(&self, pos: Pos) -> DropTarget {
        if !self.bounds.contains(pos) {
            return DropTarget::Outside;
        }
        self.regions
            .iter()
            .position(|r| r.band.contains(pos))
            .map_or(DropTarget::NewRegion, DropTarget::Region)
    }

    /// Add `vars` to region `region`, or to a new region when `None`.
    ///
    /// Variables already in the target region are not added twice. The
    /// caller is responsible for binding them to the log first.
    pub fn bind_drop(&mut self, region: Option<usize>, vars: &[VarPath]) -> PlotResult<BindOutcome> {
        if vars.is_empty() {
            return Ok(BindOutcome::Ignored);
        }
        let outcome = match region {
            Some(index) => {
                let len = self.regions.len();
                let target = self
                    .regions
                    .get_mut(index)
                    .ok_or(PlotError::RegionOutOfRange { index, len })?;
                let added = target.append(vars);
                if added == 0 {
                    return Ok(BindOutcome::Appended { region: index, added });
                }
                tracing::info!(region = index, added, "series appended to region");
                BindOutcome::Appended { region: index, added }
            }
            None => {
                let mut unique: Vec<VarPath> = Vec::with_capacity(vars.len());
                for var in vars {
                    if !unique.contains(var) {
                        unique.push(var.clone());
                    }
                }
                self.regions.push(PlotRegion::new(unique));
                let index = self.regions.len() - 1;
                tracing::info!(region = index, series = vars.len(), "plot region created");
                BindOutcome::Created { region: index }
            }
        };
        self.layout();
        self.invalidate("series bound");
        Ok(outcome)
    }

    // ---- incremental update ----

    /// Extend every series by the newest column of `log`.
    ///
    /// Emits one segment per series while the background stays valid; axis
    /// or value-range growth schedules a full redraw instead.
    pub fn on_step(&mut self, log: &TimeSeriesLog) {
        let Some(last) = log.ncol().checked_sub(1) else {
            return;
        };
        if self.axis.follow_to(log.time(last)) {
            self.invalidate("time axis grew");
            return;
        }
        if last == 0 || !self.compositor.is_valid() {
            return;
        }

        let mut grew = false;
        for region in &mut self.regions {
            for var in &region.series {
                if let Some(v) = log.value_at(var.as_str(), last) {
                    grew |= region.y.include(v);
                }
            }
        }
        if grew {
            self.invalidate("value range grew");
            return;
        }

        let (t0, t1) = (log.time(last - 1), log.time(last));
        if !self.axis.contains(t0) || !self.axis.contains(t1) {
            return;
        }
        for (ri, region) in self.regions.iter().enumerate() {
            if region.data.is_degenerate() {
                continue;
            }
            for (si, var) in region.series().iter().enumerate() {
                let (Some(v0), Some(v1)) = (
                    log.value_at(var.as_str(), last - 1),
                    log.value_at(var.as_str(), last),
                ) else {
                    continue;
                };
                if !(v0.is_finite() && v1.is_finite()) {
                    continue;
                }
                let from = Pos::new(
                    self.axis.to_screen(t0, &region.data),
                    region.y.to_screen(v0, &region.data),
                );
                let to = Pos::new(
                    self.axis.to_screen(t1, &region.data),
                    region.y.to_screen(v1, &region.data),
                );
                let stroke = series_stroke(self.selected, SeriesRef { region: ri, series: si });
                self.compositor.push_pending(Artifact::segment(from, to, stroke));
            }
        }
    }

    /// Refit value ranges and the followed time range to the full history.
    fn refit(&mut self, log: &TimeSeriesLog) {
        for region in &mut self.regions {
            region.y = ValueRange::fit(
                region
                    .series()
                    .iter()
                    .filter_map(|v| log.history_of(v.as_str()).ok()),
            );
        }
        if let Some(last) = log.last_time() {
            self.axis.follow_to(last);
        }
    }

    /// Draw a frame: full redraw if anything structural changed since the
    /// last capture, otherwise background plus dynamic artifacts.
    pub fn render<L: RenderLayer + ?Sized>(&mut self, log: &TimeSeriesLog, layer: &mut L) -> FrameKind {
        if !self.compositor.is_valid() {
            self.refit(log);
        }
        let view = SceneView {
            options: &self.options,
            bounds: self.bounds,
            regions: &self.regions,
            axis: &self.axis,
            selected: self.selected,
            strip: self.new_region_rect(),
        };
        let overlay = match self.hover {
            Some(pointer) => view.crosshair(pointer, log),
            None => Vec::new(),
        };
        self.compositor.present(layer, || view.scene(log), &overlay)
    }

    // ---- pointer interaction ----

    fn region_at(&self, pos: Pos) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| !r.data.is_degenerate() && r.data.contains(pos))
    }

    /// Track the pointer. Returns true if the overlay needs a redraw.
    pub fn pointer_move(&mut self, pos: Pos) -> bool {
        let was = self.hover.is_some();
        self.hover = self.region_at(pos).map(|_| pos);
        was || self.hover.is_some()
    }

    /// Pointer left the surface: hide crosshair and readouts.
    pub fn pointer_leave(&mut self) -> bool {
        self.hover.take().is_some()
    }

    /// Sample index under the crosshair, if it is shown.
    pub fn crosshair_index(&self, log: &TimeSeriesLog) -> Option<usize> {
        let pointer = self.hover?;
        let region = &self.regions[self.region_at(pointer)?];
        let last = log.ncol().checked_sub(1)?;
        let t = self.axis.from_screen(pointer.x, &region.data);
        Some(nearest_index(t, log.dt()).min(last))
    }

    /// Select the series within hit distance of `pos`, or clear the selection.
    pub fn click(&mut self, pos: Pos, log: &TimeSeriesLog) -> Option<SeriesRef> {
        let hit = self.hit_test(pos, log);
        self.select(hit);
        hit
    }

    pub fn select(&mut self, selection: Option<SeriesRef>) {
        let selection = selection.filter(|s| {
            self.regions
                .get(s.region)
                .is_some_and(|r| s.series < r.series().len())
        });
        if selection != self.selected {
            self.selected = selection;
            self.invalidate("selection changed");
        }
    }

    fn hit_test(&self, pos: Pos, log: &TimeSeriesLog) -> Option<SeriesRef> {
        let ri = self.region_at(pos)?;
        let region = &self.regions[ri];
        let last = log.ncol().checked_sub(1)?;
        let reach = self.options.hit_distance_px;
        let dt = log.dt();

        // Only samples within reach of the pointer matter.
        let t_lo = self.axis.from_screen(pos.x - reach, &region.data);
        let t_hi = self.axis.from_screen(pos.x + reach, &region.data);
        let i0 = (t_lo / dt).floor().max(0.0) as usize;
        let i1 = ((t_hi / dt).ceil().max(0.0) as usize + 1).min(last);
        let i0 = i0.min(i1);

        let mut best: Option<(f32, usize)> = None;
        for (si, var) in region.series().iter().enumerate() {
            let Ok(row) = log.history_of(var.as_str()) else {
                continue;
            };
            for points in view_polylines(row, i0, i1, dt, &self.axis, &region.y, &region.data) {
                let d = if points.len() == 1 {
                    (points[0] - pos).length()
                } else {
                    distance_to_polyline(pos, &points)
                };
                if d <= reach && best.is_none_or(|(bd, _)| d < bd) {
                    best = Some((d, si));
                }
            }
        }
        best.map(|(_, series)| SeriesRef { region: ri, series })
    }

    /// Remove the selected series; an emptied region disappears and the
    /// regions below move up. Returns the removed variable.
    pub fn delete_selected(&mut self) -> Option<VarPath> {
        let sel = self.selected.take()?;
        let region = self.regions.get_mut(sel.region)?;
        let removed = region.remove(sel.series)?;
        if region.is_empty() {
            self.regions.remove(sel.region);
            tracing::info!(region = sel.region, "plot region removed");
        }
        self.hover = None;
        self.layout();
        self.invalidate("series deleted");
        Some(removed)
    }

    /// Zoom the time axis around the pointer by `zoom_base^-steps`.
    ///
    /// Only axis bounds change. Returns true if they did.
    pub fn zoom(&mut self, pos: Pos, steps: f64, log: &TimeSeriesLog) -> bool {
        let Some(ri) = self.region_at(pos) else {
            return false;
        };
        let Some(last) = log.last_time() else {
            return false;
        };
        let anchor = self.axis.from_screen(pos.x, &self.regions[ri].data);
        let changed = self.axis.zoom(anchor, steps, self.options.zoom_base, last);
        if changed {
            self.invalidate("zoomed");
        }
        changed
    }

    pub fn stats_summary(&self) -> String {
        self.compositor.stats().summary()
    }
}

fn series_stroke(selected: Option<SeriesRef>, series: SeriesRef) -> Stroke {
    if selected == Some(series) {
        Stroke::new(SELECTED_WIDTH, Color::HIGHLIGHT)
    } else {
        Stroke::new(SERIES_WIDTH, Color::series(series.series))
    }
}

/// Evenly spaced interior grid lines of `data`, both directions.
fn grid_lines(data: &Rect) -> Vec<Artifact> {
    let stroke = Stroke::new(1.0, Color::GRID);
    let n = GRID_DIVISIONS as f32;
    (1..GRID_DIVISIONS)
        .flat_map(|i| {
            let x = data.min.x + data.width() * i as f32 / n;
            let y = data.min.y + data.height() * i as f32 / n;
            [
                Artifact::segment(Pos::new(x, data.min.y), Pos::new(x, data.max.y), stroke),
                Artifact::segment(Pos::new(data.min.x, y), Pos::new(data.max.x, y), stroke),
            ]
        })
        .collect()
}

/// Screen polylines of `row[i0..=i1]`, split wherever a sample is not finite.
fn view_polylines(
    row: &[f64],
    i0: usize,
    i1: usize,
    dt: f64,
    axis: &TimeAxis,
    y: &ValueRange,
    rect: &Rect,
) -> Vec<Vec<Pos>> {
    let mut out = Vec::new();
    let mut current: Vec<Pos> = Vec::new();
    for i in i0..=i1.min(row.len().saturating_sub(1)) {
        let v = row[i];
        if v.is_finite() {
            current.push(Pos::new(
                axis.to_screen(i as f64 * dt, rect),
                y.to_screen(v, rect),
            ));
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Borrowed view used to build artifacts while the compositor is borrowed.
struct SceneView<'a> {
    options: &'a SurfaceOptions,
    bounds: Rect,
    regions: &'a [PlotRegion],
    axis: &'a TimeAxis,
    selected: Option<SeriesRef>,
    strip: Rect,
}

impl SceneView<'_> {
    fn label(&self, text: &str) -> (f32, f32) {
        label_size(
            text,
            self.options.label_char_width_px,
            self.options.label_line_height_px,
        )
    }

    fn text(pos: Pos, text: String, color: Color, role: TextRole) -> Artifact {
        Artifact::Text {
            pos,
            text,
            color,
            role,
        }
    }

    fn centered(&self, rect: &Rect, text: &str, role: TextRole) -> Artifact {
        let (w, h) = self.label(text);
        let pos = Pos::new(
            rect.min.x + (rect.width() - w) / 2.0,
            rect.min.y + (rect.height() - h) / 2.0,
        );
        Self::text(pos, text.to_string(), Color::HINT, role)
    }

    fn scene(&self, log: &TimeSeriesLog) -> Scene {
        let mut scene = Scene::default();
        if self.regions.is_empty() {
            if !self.bounds.is_degenerate() {
                scene.push(self.centered(&self.bounds, EMPTY_HINT, TextRole::Hint));
            }
            return scene;
        }

        let prec = self.options.value_precision;
        let tprec = self.options.time_precision;
        let h = self.options.label_line_height_px;
        let bottom = self.regions.len() - 1;
        let (t_lo, t_hi) = self.axis.range();
        let dt = log.dt();
        let last = log.ncol().checked_sub(1);

        for (ri, region) in self.regions.iter().enumerate() {
            let data = region.data;
            if data.is_degenerate() {
                continue;
            }
            scene.artifacts.extend(grid_lines(&data));
            scene.push(Artifact::Frame {
                rect: data,
                stroke: Stroke::new(1.0, Color::FRAME),
            });
            scene.push(Self::text(
                Pos::new(data.min.x, region.band.min.y + 2.0),
                region.title().to_string(),
                Color::TEXT,
                TextRole::AxisLabel,
            ));
            scene.push(Self::text(
                Pos::new(region.band.min.x + 2.0, data.min.y),
                format!("{:.prec$}", region.y.hi),
                Color::TEXT,
                TextRole::Tick,
            ));
            scene.push(Self::text(
                Pos::new(region.band.min.x + 2.0, data.max.y - h),
                format!("{:.prec$}", region.y.lo),
                Color::TEXT,
                TextRole::Tick,
            ));

            if let Some(last) = last {
                let i0 = ((t_lo / dt).floor().max(0.0) as usize).min(last);
                let i1 = ((t_hi / dt).ceil().max(0.0) as usize).min(last);
                for (si, var) in region.series().iter().enumerate() {
                    let Ok(row) = log.history_of(var.as_str()) else {
                        continue;
                    };
                    let stroke = series_stroke(self.selected, SeriesRef { region: ri, series: si });
                    for points in view_polylines(row, i0, i1, dt, self.axis, &region.y, &data) {
                        if points.len() >= 2 {
                            scene.push(Artifact::Polyline { points, stroke });
                        }
                    }
                }
            }

            if ri == bottom {
                let lo = format!("{t_lo:.tprec$}");
                let hi = format!("{t_hi:.tprec$}");
                let (w_hi, _) = self.label(&hi);
                let y = data.max.y + 2.0;
                scene.push(Self::text(Pos::new(data.min.x, y), lo, Color::TEXT, TextRole::Tick));
                scene.push(Self::text(
                    Pos::new(data.max.x - w_hi, y),
                    hi,
                    Color::TEXT,
                    TextRole::Tick,
                ));
                let title = "Time (s)";
                let (w, _) = self.label(title);
                scene.push(Self::text(
                    Pos::new(data.min.x + (data.width() - w) / 2.0, y),
                    title.to_string(),
                    Color::TEXT,
                    TextRole::AxisLabel,
                ));
            }
        }

        if !self.strip.is_degenerate() {
            scene.push(self.centered(&self.strip, STRIP_HINT, TextRole::Hint));
        }
        scene
    }

    /// Crosshair line in every region, value readouts at the nearest
    /// sample and a time readout above the top region.
    fn crosshair(&self, pointer: Pos, log: &TimeSeriesLog) -> Vec<Artifact> {
        let mut out = Vec::new();
        let Some(last) = log.ncol().checked_sub(1) else {
            return out;
        };
        let Some(first) = self.regions.iter().find(|r| !r.data.is_degenerate()) else {
            return out;
        };
        let t = self.axis.from_screen(pointer.x, &first.data);
        let idx = nearest_index(t, log.dt()).min(last);
        let t0 = log.time(idx);
        let prec = self.options.value_precision;
        let line = Stroke::new(1.0, Color::CROSSHAIR);

        for region in self.regions {
            let data = region.data;
            if data.is_degenerate() {
                continue;
            }
            out.push(Artifact::Polyline {
                points: vec![Pos::new(pointer.x, data.min.y), Pos::new(pointer.x, data.max.y)],
                stroke: line,
            });
            for var in region.series() {
                let Some(v) = log.value_at(var.as_str(), idx) else {
                    continue;
                };
                if !v.is_finite() {
                    continue;
                }
                let text = format!(" {v:.prec$} ");
                let (w, h) = self.label(&text);
                let anchor = Pos::new(self.axis.to_screen(t0, &data), region.y.to_screen(v, &data));
                let pos = place_label(anchor, w, h, &data);
                out.push(Self::text(pos, text, Color::CROSSHAIR, TextRole::Readout));
            }
        }

        let tprec = self.options.time_precision;
        let text = format!("t={t0:.tprec$}s");
        let (w, h) = self.label(&text);
        let x = self.axis.to_screen(t0, &first.data) - w / 2.0;
        let x = x.min(first.band.max.x - w).max(first.band.min.x);
        let y = (first.data.min.y - h).max(first.band.min.y);
        out.push(Self::text(Pos::new(x, y), text, Color::CROSSHAIR, TextRole::Readout));
        out
    }
}
