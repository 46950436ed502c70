use std::path::Path;
use std::time::Instant;

use pt_app::{AppResult, DemoEngine, DragState, DropOutcome, Session, demo_engine};

use crate::layer::{from_pos2, to_pos2};
use crate::views::{PlotCanvas, TreePanel};

/// Time step of the built-in demo engine.
const DEMO_DT_S: f64 = 0.01;

pub struct InspectorApp {
    session: Session<DemoEngine>,
    tree_panel: TreePanel,
    canvas: PlotCanvas,
    status: Option<String>,
}

impl InspectorApp {
    pub fn open_session(config_path: Option<&Path>) -> AppResult<Session<DemoEngine>> {
        let config = pt_app::load_config_or_default(config_path)?;
        let mut session = Session::new(demo_engine(DEMO_DT_S)?, config)?;
        session.initialize()?;
        Ok(session)
    }

    pub fn new(cc: &eframe::CreationContext<'_>, session: Session<DemoEngine>) -> Self {
        Self {
            session,
            tree_panel: TreePanel::default(),
            canvas: PlotCanvas::new(cc.egui_ctx.clone()),
            status: None,
        }
    }

    fn report<T>(&mut self, result: AppResult<T>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "inspector action failed");
            self.status = Some(e.to_string());
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Initialize").clicked() {
                let result = self.session.initialize();
                self.report(result);
            }
            let running = self.session.is_running();
            if ui.add_enabled(!running, egui::Button::new("Run")).clicked() {
                self.session.run(Instant::now());
            }
            if ui.add_enabled(!running, egui::Button::new("Step")).clicked() {
                let result = self.session.step_once();
                self.report(result);
            }
            if ui.add_enabled(running, egui::Button::new("Pause")).clicked() {
                self.session.pause();
            }

            ui.separator();
            ui.monospace(format!("t = {:.3} s", self.session.sim_time()));
            if let Some(index) = self.session.crosshair_index() {
                ui.monospace(format!("sample {}", index));
            }

            if let Some(msg) = &self.status {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(200, 60, 60), msg);
                if ui.small_button("✕").clicked() {
                    self.status = None;
                }
            }
        });
    }

    /// Follow the pointer globally while a tree drag is in progress.
    fn track_drag(&mut self, ctx: &egui::Context) {
        if matches!(self.session.drag().state(), DragState::Idle) {
            return;
        }
        let (pos, released) = ctx.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
        let Some(pos) = pos else {
            if released {
                self.session.cancel_drag();
            }
            return;
        };
        self.session.pointer_move(from_pos2(pos));
        if released {
            match self.session.pointer_up(from_pos2(pos)) {
                Ok(Some(DropOutcome::Bind { payload, .. })) => {
                    tracing::debug!(count = payload.len(), "drop bound");
                }
                Ok(_) => {}
                Err(e) => self.status = Some(format!("Drop failed: {}", e)),
            }
        }
        ctx.request_repaint();
    }

    fn draw_preview(&self, ctx: &egui::Context) {
        let Some(preview) = self.session.drag().preview() else {
            return;
        };
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("drag_preview"),
        ));
        let font = egui::FontId::proportional(13.0);
        let line_h = 16.0;
        let width = preview
            .lines
            .iter()
            .map(|l| l.chars().count() as f32 * 7.5)
            .fold(40.0, f32::max)
            + 12.0;
        let rect = egui::Rect::from_min_size(
            to_pos2(preview.pos),
            egui::vec2(width, line_h * preview.lines.len() as f32 + 6.0),
        );
        painter.rect_filled(rect, 3.0, egui::Color32::from_rgba_unmultiplied(250, 250, 220, 230));
        painter.rect_stroke(rect, 3.0, egui::Stroke::new(1.0, egui::Color32::GRAY));
        for (i, line) in preview.lines.iter().enumerate() {
            painter.text(
                rect.min + egui::vec2(6.0, 3.0 + i as f32 * line_h),
                egui::Align2::LEFT_TOP,
                line,
                font.clone(),
                egui::Color32::BLACK,
            );
        }
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let polled = self.session.poll(now);
        self.report(polled);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::SidePanel::left("property_tree")
            .default_width(360.0)
            .show(ctx, |ui| {
                if let Some(msg) = self.tree_panel.show(ui, &mut self.session) {
                    self.status = Some(msg);
                }
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.canvas.show(ui, &mut self.session);
            });

        self.track_drag(ctx);
        self.draw_preview(ctx);

        if let Some(wait) = self.session.timer().time_until(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
