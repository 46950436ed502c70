//! Backend-neutral drawing: artifacts, the render layer and the compositor.
//!
//! A frame is either a full redraw (scene drawn from scratch, then captured
//! as the background) or a blit (cached background restored, then only the
//! dynamic artifacts drawn on top). The compositor tracks which one is due.

use pt_core::timing::{LoopStats, Timer};

use crate::geometry::{Pos, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const TEXT: Color = Color::rgb(40, 40, 40);
    pub const FRAME: Color = Color::rgb(120, 120, 120);
    pub const GRID: Color = Color::rgb(220, 220, 220);
    pub const HINT: Color = Color::rgb(140, 140, 140);
    pub const CROSSHAIR: Color = Color::rgb(214, 39, 40);
    pub const HIGHLIGHT: Color = Color::rgb(255, 0, 0);

    /// Cycle of series colours, by position in the region.
    pub const PALETTE: [Color; 10] = [
        Color::rgb(31, 119, 180),
        Color::rgb(255, 127, 14),
        Color::rgb(44, 160, 44),
        Color::rgb(214, 39, 40),
        Color::rgb(148, 103, 189),
        Color::rgb(140, 86, 75),
        Color::rgb(227, 119, 194),
        Color::rgb(127, 127, 127),
        Color::rgb(188, 189, 34),
        Color::rgb(23, 190, 207),
    ];

    pub fn series(index: usize) -> Color {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Axis title (variable path, "Time (s)").
    AxisLabel,
    /// Range values along an axis.
    Tick,
    /// Crosshair value or time readout.
    Readout,
    /// Placeholder text on an empty surface.
    Hint,
}

/// One drawable item. Positions are surface pixels; `Text::pos` is the
/// top-left corner of the label.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Polyline { points: Vec<Pos>, stroke: Stroke },
    Frame { rect: Rect, stroke: Stroke },
    Text {
        pos: Pos,
        text: String,
        color: Color,
        role: TextRole,
    },
}

impl Artifact {
    pub fn segment(from: Pos, to: Pos, stroke: Stroke) -> Self {
        Artifact::Polyline {
            points: vec![from, to],
            stroke,
        }
    }
}

/// Everything that goes into the cached background.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub artifacts: Vec<Artifact>,
}

impl Scene {
    pub fn push(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Drawing backend.
pub trait RenderLayer {
    /// Draw the whole static scene from scratch.
    fn draw_scene(&mut self, scene: &Scene);

    /// Snapshot what has been drawn so far as the background.
    fn capture_background(&mut self);

    /// Reset the frame to the last captured background.
    fn restore_background(&mut self);

    /// Draw artifacts on top of the current frame.
    fn draw_dynamic(&mut self, artifacts: &[Artifact]);

    /// Drop the cached background.
    fn invalidate(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Full,
    Blit,
}

/// Decides between full redraw and blit, and keeps the segments drawn
/// since the last background capture.
///
/// Invalidation is lazy: it only clears a flag, the scene is rebuilt on the
/// next [`Compositor::present`].
pub struct Compositor {
    background_valid: bool,
    pending: Vec<Artifact>,
    batch_limit: usize,
    stats: LoopStats,
}

impl Compositor {
    pub fn new(batch_limit: usize) -> Self {
        Self {
            background_valid: false,
            pending: Vec::new(),
            batch_limit: batch_limit.max(1),
            stats: LoopStats::default(),
        }
    }

    pub fn invalidate(&mut self) {
        self.background_valid = false;
        self.pending.clear();
    }

    pub fn is_valid(&self) -> bool {
        self.background_valid
    }

    pub fn pending(&self) -> &[Artifact] {
        &self.pending
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// Queue an incremental artifact for every following blit.
    ///
    /// Ignored while invalid (the next scene contains it anyway). Past the
    /// batch limit the background is scheduled for recapture.
    pub fn push_pending(&mut self, artifact: Artifact) {
        if !self.background_valid {
            return;
        }
        self.pending.push(artifact);
        if self.pending.len() > self.batch_limit {
            tracing::debug!(pending = self.pending.len(), "segment batch full, recapturing background");
            self.invalidate();
        }
    }

    /// Draw one frame. `scene` is only built when a full redraw is due.
    pub fn present<L: RenderLayer + ?Sized>(
        &mut self,
        layer: &mut L,
        scene: impl FnOnce() -> Scene,
        overlay: &[Artifact],
    ) -> FrameKind {
        let timer = Timer::start();
        let kind = if self.background_valid {
            layer.restore_background();
            if !self.pending.is_empty() {
                layer.draw_dynamic(&self.pending);
            }
            FrameKind::Blit
        } else {
            layer.invalidate();
            let scene = scene();
            layer.draw_scene(&scene);
            layer.capture_background();
            self.background_valid = true;
            self.pending.clear();
            FrameKind::Full
        };
        if !overlay.is_empty() {
            layer.draw_dynamic(overlay);
        }
        if let Some(elapsed) = timer.stop() {
            match kind {
                FrameKind::Full => self.stats.full_redraw.record(elapsed),
                FrameKind::Blit => self.stats.blit.record(elapsed),
            }
        }
        kind
    }
}

/// A call received by a [`RecordingLayer`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayerCall {
    DrawScene { artifacts: usize },
    CaptureBackground,
    RestoreBackground,
    DrawDynamic { artifacts: usize },
    Invalidate,
}

/// Headless layer that records calls; used by tests and the command line.
#[derive(Debug, Default)]
pub struct RecordingLayer {
    pub calls: Vec<LayerCall>,
    pub last_scene: Scene,
    /// Dynamic artifacts drawn since the last restore or scene.
    pub dynamic: Vec<Artifact>,
}

impl RecordingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn full_redraws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, LayerCall::DrawScene { .. }))
            .count()
    }

    /// Total artifacts pushed through `draw_dynamic`.
    pub fn dynamic_artifacts(&self) -> usize {
        self.calls
            .iter()
            .map(|c| match c {
                LayerCall::DrawDynamic { artifacts } => *artifacts,
                _ => 0,
            })
            .sum()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.last_scene
            .artifacts
            .iter()
            .chain(&self.dynamic)
            .filter_map(|a| match a {
                Artifact::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderLayer for RecordingLayer {
    fn draw_scene(&mut self, scene: &Scene) {
        self.calls.push(LayerCall::DrawScene {
            artifacts: scene.len(),
        });
        self.last_scene = scene.clone();
        self.dynamic.clear();
    }

    fn capture_background(&mut self) {
        self.calls.push(LayerCall::CaptureBackground);
    }

    fn restore_background(&mut self) {
        self.calls.push(LayerCall::RestoreBackground);
        self.dynamic.clear();
    }

    fn draw_dynamic(&mut self, artifacts: &[Artifact]) {
        self.calls.push(LayerCall::DrawDynamic {
            artifacts: artifacts.len(),
        });
        self.dynamic.extend_from_slice(artifacts);
    }

    fn invalidate(&mut self) {
        self.calls.push(LayerCall::Invalidate);
    }
}
