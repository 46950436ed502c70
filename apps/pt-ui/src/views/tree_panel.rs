use egui_extras::{Column, TableBuilder};
use pt_app::{DemoEngine, Session};
use pt_core::NodeId;

use crate::layer::from_pos2;

/// Property tree with search box, value column and in-place editing.
#[derive(Default)]
pub struct TreePanel {
    search: String,
    edit: Option<ValueEdit>,
}

struct ValueEdit {
    path: String,
    text: String,
}

/// Owned copy of a visible row, so the session can be mutated afterwards.
struct RowData {
    id: NodeId,
    name: String,
    depth: usize,
    has_children: bool,
    expanded: bool,
    selected: bool,
    leaf: Option<LeafData>,
}

struct LeafData {
    path: String,
    writable: bool,
    value: String,
}

enum TreeAction {
    Toggle(NodeId),
    Select { id: NodeId, additive: bool },
    Press {
        id: NodeId,
        grab_only: bool,
        pos: egui::Pos2,
        row_origin: egui::Pos2,
    },
    StartEdit { path: String, text: String },
    Commit,
    CancelEdit,
}

impl TreePanel {
    /// Draw the panel. Returns a status message for the user, if any.
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut Session<DemoEngine>) -> Option<String> {
        let mut status = None;

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Search")
                    .desired_width(ui.available_width() - 80.0),
            );
            if response.changed() {
                session.search(&self.search);
            }
            if ui.button("Collapse").clicked() {
                session.collapse_all();
            }
        });
        ui.separator();

        let rows = Self::collect_rows(session);
        let mut actions = Vec::new();

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(160.0)) // Property
            .column(Column::initial(100.0).at_least(70.0)) // Value
            .column(Column::exact(28.0)) // Access
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Property");
                });
                header.col(|ui| {
                    ui.strong("Value");
                });
                header.col(|ui| {
                    ui.strong("");
                });
            })
            .body(|mut body| {
                for data in &rows {
                    body.row(20.0, |mut row| {
                        row.col(|ui| {
                            ui.add_space(12.0 * data.depth as f32);
                            if data.has_children {
                                let icon = if data.expanded { "▾" } else { "▸" };
                                if ui.small_button(icon).clicked() {
                                    actions.push(TreeAction::Toggle(data.id));
                                }
                            }
                            let response = ui
                                .selectable_label(data.selected, &data.name)
                                .interact(egui::Sense::click_and_drag());
                            if response.clicked() {
                                let additive = ui.input(|i| i.modifiers.command);
                                actions.push(TreeAction::Select {
                                    id: data.id,
                                    additive,
                                });
                            }
                            if response.drag_started() {
                                let press = ui.input(|i| i.pointer.press_origin());
                                if let Some(pos) = press {
                                    actions.push(TreeAction::Press {
                                        id: data.id,
                                        grab_only: data.leaf.is_some() && !data.selected,
                                        pos,
                                        row_origin: response.rect.min,
                                    });
                                }
                            }
                        });
                        row.col(|ui| {
                            let Some(leaf) = &data.leaf else {
                                return;
                            };
                            match self.edit.as_mut().filter(|e| e.path == leaf.path) {
                                Some(edit) => {
                                    let response = ui.text_edit_singleline(&mut edit.text);
                                    if response.lost_focus() {
                                        if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                            actions.push(TreeAction::Commit);
                                        } else {
                                            actions.push(TreeAction::CancelEdit);
                                        }
                                    } else {
                                        response.request_focus();
                                    }
                                }
                                None => {
                                    let response = ui.label(&leaf.value);
                                    if leaf.writable
                                        && response.interact(egui::Sense::click()).double_clicked()
                                    {
                                        actions.push(TreeAction::StartEdit {
                                            path: leaf.path.clone(),
                                            text: leaf.value.clone(),
                                        });
                                    }
                                }
                            }
                        });
                        row.col(|ui| {
                            if let Some(leaf) = &data.leaf {
                                ui.weak(if leaf.writable { "RW" } else { "RO" });
                            }
                        });
                    });
                }
            });

        for action in actions {
            match action {
                TreeAction::Toggle(id) => session.tree_mut().toggle_expanded(id),
                TreeAction::Select { id, additive } => {
                    let selection = &mut session.tree_mut().selection;
                    if additive {
                        selection.toggle(id);
                    } else {
                        selection.select(id);
                    }
                }
                TreeAction::Press {
                    id,
                    grab_only,
                    pos,
                    row_origin,
                } => {
                    // Dragging an unselected leaf drags that leaf alone.
                    if grab_only {
                        session.tree_mut().selection.select(id);
                    }
                    session.pointer_down(from_pos2(pos), from_pos2(row_origin));
                }
                TreeAction::StartEdit { path, text } => {
                    self.edit = Some(ValueEdit { path, text });
                }
                TreeAction::Commit => {
                    if let Some(edit) = self.edit.take() {
                        if let Err(e) = session.edit_value(&edit.path, &edit.text) {
                            status = Some(format!("Edit rejected: {}", e));
                        }
                    }
                }
                TreeAction::CancelEdit => self.edit = None,
            }
        }
        status
    }

    fn collect_rows(session: &Session<DemoEngine>) -> Vec<RowData> {
        let trie = session.catalog().tree();
        let tree = session.tree();
        tree.rows(trie)
            .into_iter()
            .map(|row| {
                let leaf = trie
                    .payload(row.id)
                    .filter(|_| row.is_leaf)
                    .map(|var| LeafData {
                        path: var.path.to_string(),
                        writable: var.writable,
                        value: session
                            .read_value(var.path.as_str())
                            .map(|v| session.format_value(v))
                            .unwrap_or_else(|_| "-".to_string()),
                    });
                RowData {
                    id: row.id,
                    name: row.name.to_string(),
                    depth: row.depth,
                    has_children: row.has_children,
                    expanded: row.expanded,
                    selected: tree.selection.contains(row.id),
                    leaf,
                }
            })
            .collect()
    }
}
