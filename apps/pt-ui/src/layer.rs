//! egui backend for the plot surface.
//!
//! egui repaints every frame, so the "background" is the cached list of
//! shapes built at the last full redraw. A blit replays that list instead
//! of walking the sample history again.

use egui::{Align2, Color32, FontId, Shape};
use pt_plot::{Artifact, Color, Pos, Rect, RenderLayer, Scene};

pub fn to_pos2(p: Pos) -> egui::Pos2 {
    egui::pos2(p.x, p.y)
}

pub fn from_pos2(p: egui::Pos2) -> Pos {
    Pos::new(p.x, p.y)
}

pub fn from_rect(r: egui::Rect) -> Rect {
    Rect::from_min_max(from_pos2(r.min), from_pos2(r.max))
}

fn to_color(c: Color) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

pub struct EguiLayer {
    ctx: egui::Context,
    font: FontId,
    background: Vec<Shape>,
    frame: Vec<Shape>,
}

impl EguiLayer {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            // Monospace keeps label widths close to the surface's estimate.
            font: FontId::monospace(12.0),
            background: Vec::new(),
            frame: Vec::new(),
        }
    }

    /// Shapes of the frame just presented.
    pub fn take_frame(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.frame)
    }

    fn shape(&self, artifact: &Artifact) -> Shape {
        match artifact {
            Artifact::Polyline { points, stroke } => Shape::line(
                points.iter().copied().map(to_pos2).collect(),
                egui::Stroke::new(stroke.width, to_color(stroke.color)),
            ),
            Artifact::Frame { rect, stroke } => Shape::rect_stroke(
                egui::Rect::from_min_max(to_pos2(rect.min), to_pos2(rect.max)),
                0.0,
                egui::Stroke::new(stroke.width, to_color(stroke.color)),
            ),
            Artifact::Text {
                pos, text, color, ..
            } => self.ctx.fonts(|fonts| {
                Shape::text(
                    fonts,
                    to_pos2(*pos),
                    Align2::LEFT_TOP,
                    text,
                    self.font.clone(),
                    to_color(*color),
                )
            }),
        }
    }
}

impl RenderLayer for EguiLayer {
    fn draw_scene(&mut self, scene: &Scene) {
        self.frame = scene.artifacts.iter().map(|a| self.shape(a)).collect();
    }

    fn capture_background(&mut self) {
        self.background = self.frame.clone();
    }

    fn restore_background(&mut self) {
        self.frame = self.background.clone();
    }

    fn draw_dynamic(&mut self, artifacts: &[Artifact]) {
        let shapes: Vec<Shape> = artifacts.iter().map(|a| self.shape(a)).collect();
        self.frame.extend(shapes);
    }

    fn invalidate(&mut self) {
        self.background.clear();
    }
}
