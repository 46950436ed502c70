use pt_app::{DemoEngine, Session};

use crate::layer::{EguiLayer, from_pos2, from_rect};

/// Scroll distance (points) that counts as one zoom step.
const SCROLL_PER_STEP: f32 = 50.0;

/// The plot surface drawn into an egui painter.
pub struct PlotCanvas {
    layer: EguiLayer,
}

impl PlotCanvas {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            layer: EguiLayer::new(ctx),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut Session<DemoEngine>) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        painter.rect_filled(response.rect, 0.0, egui::Color32::WHITE);
        session.surface_mut().set_bounds(from_rect(response.rect));

        if !session.drag().is_dragging() {
            match response.hover_pos() {
                Some(pos) => {
                    session.surface_mut().pointer_move(from_pos2(pos));
                }
                None => {
                    session.pointer_leave();
                }
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                session.click(from_pos2(pos));
            }
        }

        if let Some(pos) = response.hover_pos() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                session.zoom(from_pos2(pos), f64::from(scroll / SCROLL_PER_STEP));
            }
        }

        let editing = ui.ctx().memory(|m| m.focused().is_some());
        let delete = ui.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace));
        if delete && !editing {
            if let Some(var) = session.delete_selected() {
                tracing::info!(path = %var, "series removed from plot");
            }
        }

        session.render(&mut self.layer);
        painter.extend(self.layer.take_frame());
    }
}
