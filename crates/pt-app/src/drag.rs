//! Tree-to-plot drag and drop, as an explicit state machine.
//!
//! Driven by three pointer events. A press arms the machine, the first
//! motion past the threshold captures the tree selection as the payload and
//! starts the floating preview, and the release resolves the drop target.

use pt_core::VarPath;
use pt_plot::{DropTarget, Pos};

/// Floating label that follows the pointer while dragging.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    pub lines: Vec<String>,
    /// Top-left corner, in surface coordinates.
    pub pos: Pos,
}

impl DragPreview {
    fn new(payload: &[VarPath], max_items: usize, pos: Pos) -> Self {
        let mut lines: Vec<String> = payload
            .iter()
            .take(max_items)
            .map(|v| v.name().to_string())
            .collect();
        if payload.len() > max_items {
            lines.push("…".to_string());
        }
        Self { lines, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    /// Pressed, not moved yet. `grab` is the pointer offset inside the
    /// pressed row, kept so the preview sits where the row was grabbed.
    Armed { origin: Pos, grab: Pos },
    /// An empty payload never gets a preview and releases as a click.
    Dragging {
        payload: Vec<VarPath>,
        preview: Option<DragPreview>,
        grab: Pos,
    },
}

/// Result of a release.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// Press and release without a drag (or with nothing to drag).
    Click,
    /// Released outside the plot surface; nothing changes.
    Discarded,
    /// Bind `payload` to region `region`, or to a new region when `None`.
    Bind {
        region: Option<usize>,
        payload: Vec<VarPath>,
    },
}

#[derive(Debug, Clone)]
pub struct DragBinding {
    state: DragState,
    threshold: f32,
    max_items: usize,
}

impl DragBinding {
    pub fn new(threshold: f32, max_items: usize) -> Self {
        Self {
            state: DragState::Idle,
            threshold: threshold.max(0.0),
            max_items: max_items.max(1),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        match &self.state {
            DragState::Dragging { preview, .. } => preview.as_ref(),
            _ => None,
        }
    }

    /// Press on a tree row whose top-left corner is `row_origin`.
    pub fn pointer_down(&mut self, pos: Pos, row_origin: Pos) {
        self.state = DragState::Armed {
            origin: pos,
            grab: pos - row_origin,
        };
    }

    /// Pointer motion. `selection` is only called when a drag starts.
    ///
    /// Returns true if the preview moved or appeared.
    pub fn pointer_move(&mut self, pos: Pos, selection: impl FnOnce() -> Vec<VarPath>) -> bool {
        match &mut self.state {
            DragState::Idle => false,
            DragState::Armed { origin, grab } => {
                if (pos - *origin).length() < self.threshold {
                    return false;
                }
                let grab = *grab;
                let payload = selection();
                let preview = (!payload.is_empty())
                    .then(|| DragPreview::new(&payload, self.max_items, pos - grab));
                tracing::debug!(items = payload.len(), "drag started");
                let shown = preview.is_some();
                self.state = DragState::Dragging {
                    payload,
                    preview,
                    grab,
                };
                shown
            }
            DragState::Dragging { preview, grab, .. } => match preview {
                Some(preview) => {
                    preview.pos = pos - *grab;
                    true
                }
                None => false,
            },
        }
    }

    /// Release. `target_of` resolves the drop position against the surface;
    /// it is not called for clicks. Always returns to [`DragState::Idle`].
    pub fn pointer_up(
        &mut self,
        pos: Pos,
        target_of: impl FnOnce(Pos) -> DropTarget,
    ) -> Option<DropOutcome> {
        let outcome = match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => return None,
            DragState::Armed { .. } => DropOutcome::Click,
            DragState::Dragging { payload, .. } if payload.is_empty() => DropOutcome::Click,
            DragState::Dragging { payload, .. } => match target_of(pos) {
                DropTarget::Region(index) => DropOutcome::Bind {
                    region: Some(index),
                    payload,
                },
                DropTarget::NewRegion => DropOutcome::Bind {
                    region: None,
                    payload,
                },
                DropTarget::Outside => {
                    tracing::debug!("drop outside the plot surface discarded");
                    DropOutcome::Discarded
                }
            },
        };
        Some(outcome)
    }

    /// Abort any drag without resolving it.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(names: &[&str]) -> Vec<VarPath> {
        names.iter().map(|n| VarPath::parse(n).unwrap()).collect()
    }

    fn origin() -> Pos {
        Pos::new(0.0, 0.0)
    }

    #[test]
    fn press_and_release_is_a_click() {
        let mut drag = DragBinding::new(0.0, 3);
        drag.pointer_down(Pos::new(5.0, 5.0), origin());
        assert!(matches!(drag.state(), DragState::Armed { .. }));
        assert!(drag.preview().is_none());
        let out = drag.pointer_up(Pos::new(5.0, 5.0), |_| panic!("click is not hit-tested"));
        assert_eq!(out, Some(DropOutcome::Click));
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn selection_is_captured_once_at_drag_start() {
        let mut drag = DragBinding::new(0.0, 3);
        drag.pointer_down(Pos::new(5.0, 5.0), Pos::new(0.0, 2.0));
        assert!(drag.pointer_move(Pos::new(10.0, 5.0), || vars(&["a/b", "a/c"])));
        assert!(drag.pointer_move(Pos::new(40.0, 50.0), || panic!("recaptured")));
        let preview = drag.preview().unwrap();
        assert_eq!(preview.lines, ["b", "c"]);
        assert_eq!(preview.pos, Pos::new(35.0, 47.0));

        let out = drag.pointer_up(Pos::new(40.0, 50.0), |_| DropTarget::Region(1));
        assert_eq!(
            out,
            Some(DropOutcome::Bind {
                region: Some(1),
                payload: vars(&["a/b", "a/c"]),
            })
        );
        assert!(drag.preview().is_none());
    }

    #[test]
    fn preview_elides_after_max_items() {
        let mut drag = DragBinding::new(0.0, 3);
        drag.pointer_down(origin(), origin());
        drag.pointer_move(Pos::new(1.0, 0.0), || vars(&["p/a", "p/b", "p/c", "p/d"]));
        assert_eq!(drag.preview().unwrap().lines, ["a", "b", "c", "…"]);
    }

    #[test]
    fn threshold_delays_drag_start() {
        let mut drag = DragBinding::new(4.0, 3);
        drag.pointer_down(origin(), origin());
        assert!(!drag.pointer_move(Pos::new(2.0, 0.0), || vars(&["a"])));
        assert!(!drag.is_dragging());
        assert!(drag.pointer_move(Pos::new(4.0, 0.0), || vars(&["a"])));
        assert!(drag.is_dragging());
    }

    #[test]
    fn empty_selection_stays_inert_and_releases_as_click() {
        let mut drag = DragBinding::new(0.0, 3);
        drag.pointer_down(origin(), origin());
        assert!(!drag.pointer_move(Pos::new(9.0, 9.0), Vec::new));
        assert!(drag.preview().is_none());
        let out = drag.pointer_up(Pos::new(9.0, 9.0), |_| DropTarget::NewRegion);
        assert_eq!(out, Some(DropOutcome::Click));
    }

    #[test]
    fn drop_outside_is_discarded_and_new_region_target_binds_none() {
        let mut drag = DragBinding::new(0.0, 3);
        drag.pointer_down(origin(), origin());
        drag.pointer_move(Pos::new(1.0, 1.0), || vars(&["x"]));
        assert_eq!(
            drag.pointer_up(Pos::new(1.0, 1.0), |_| DropTarget::Outside),
            Some(DropOutcome::Discarded)
        );

        drag.pointer_down(origin(), origin());
        drag.pointer_move(Pos::new(1.0, 1.0), || vars(&["x"]));
        assert_eq!(
            drag.pointer_up(Pos::new(1.0, 1.0), |_| DropTarget::NewRegion),
            Some(DropOutcome::Bind {
                region: None,
                payload: vars(&["x"]),
            })
        );
    }

    #[test]
    fn release_while_idle_and_cancel() {
        let mut drag = DragBinding::new(0.0, 3);
        assert_eq!(drag.pointer_up(origin(), |_| DropTarget::Outside), None);
        drag.pointer_down(origin(), origin());
        drag.pointer_move(Pos::new(3.0, 3.0), || vars(&["x"]));
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);
    }
}
