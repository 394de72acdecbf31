//! Canvas controller: input events → graph state operations.
//!
//! The controller holds no business rules of its own. It resolves which
//! node an event targets (hit testing in canvas space), tracks the drag in
//! progress, and owns transient UI state such as panel visibility.
//!
//! | Event                         | Effect                                   |
//! |-------------------------------|------------------------------------------|
//! | pointer down on node          | select it, open inspector, start drag    |
//! | pointer down on empty canvas  | clear selection                          |
//! | pointer move while dragging   | `move_node` (snapped)                    |
//! | connect gesture               | `connect`                                |
//! | palette drop                  | `add_node` at the inverse-projected point|
//! | Ctrl/⌘+C, Ctrl/⌘+V, Delete    | copy / paste / delete selected           |

use crate::config::EditorConfig;
use crate::input::InputEvent;
use crate::inspector::InspectorBinding;
use crate::palette::Palette;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::state::GraphState;
use crate::viewport::Viewport;
use fp_core::{MachineData, NodeId, NodeKind, Point, SnapGuides, Vec2, hit_test};

/// Which side panels are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    /// Machine library on the left.
    pub sidebar: bool,
    /// Machine configuration on the right.
    pub inspector: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            sidebar: true,
            inspector: false,
        }
    }
}

/// A node drag in progress.
#[derive(Debug, Clone, Copy)]
struct Drag {
    id: NodeId,
    /// Pointer position relative to the node's top-left corner.
    grab: Vec2,
}

#[derive(Debug, Default)]
pub struct CanvasController {
    state: GraphState,
    viewport: Viewport,
    palette: Palette,
    panels: Panels,
    drag: Option<Drag>,
}

impl CanvasController {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            state: GraphState::new(config),
            ..Default::default()
        }
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GraphState {
        &mut self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Called by the host whenever it pans or zooms.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        log::debug!(
            "palette set: {} template(s) from {:?}",
            palette.templates.len(),
            palette.source
        );
        self.palette = palette;
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn toggle_sidebar(&mut self) {
        self.panels.sidebar = !self.panels.sidebar;
    }

    pub fn close_inspector(&mut self) {
        self.panels.inspector = false;
    }

    /// The node being dragged, if any.
    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.map(|d| d.id)
    }

    /// Alignment guides to draw, only while a drag is in progress.
    pub fn guides(&self) -> SnapGuides {
        if self.drag.is_some() {
            self.state.last_guides()
        } else {
            SnapGuides::default()
        }
    }

    /// Inspector bound to the current selection.
    pub fn inspector(&mut self) -> InspectorBinding<'_> {
        InspectorBinding::new(&mut self.state)
    }

    /// The inspector's delete button. Ends a drag on the removed node.
    pub fn delete_inspected(&mut self) -> bool {
        let removed = self.inspector().delete();
        self.end_stale_drag();
        removed
    }

    /// Handle one input event. Returns `true` if the host should re-render.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        let canvas = event.position().map(|p| self.viewport.screen_to_canvas(p));
        match event {
            InputEvent::PointerDown { .. } => match canvas {
                Some(p) => self.pointer_down(p),
                None => false,
            },
            InputEvent::PointerMove { .. } => {
                self.end_stale_drag();
                let (Some(drag), Some(p)) = (self.drag, canvas) else {
                    return false;
                };
                self.state.move_node(drag.id, p - drag.grab);
                true
            }
            InputEvent::PointerUp { .. } => self.drag.take().is_some(),
            InputEvent::Connect { source, target } => {
                self.state.connect(*source, *target).is_some()
            }
            InputEvent::Drop { label, machine_id, .. } => match canvas {
                Some(p) => self.drop_machine(label, machine_id.as_deref(), p),
                None => false,
            },
            InputEvent::Measured { id, size } => {
                if !self.state.contains(*id) {
                    return false;
                }
                self.state.set_measured(*id, *size);
                true
            }
            InputEvent::Key {
                key,
                modifiers,
                in_text_input,
            } => {
                if *in_text_input {
                    return false;
                }
                match ShortcutMap::resolve(key, *modifiers) {
                    Some(action) => self.apply_shortcut(action),
                    None => false,
                }
            }
        }
    }

    fn pointer_down(&mut self, p: Point) -> bool {
        match hit_test(self.state.nodes(), p) {
            Some(id) => {
                self.state.select_node(id);
                self.panels.inspector = true;
                let origin = self.state.node(id).map_or(p, |n| n.position);
                self.drag = Some(Drag {
                    id,
                    grab: p - origin,
                });
                true
            }
            None => {
                self.drag = None;
                let had_selection = self.state.selected_id().is_some();
                self.state.clear_selection();
                had_selection
            }
        }
    }

    fn drop_machine(&mut self, label: &str, machine_id: Option<&str>, position: Point) -> bool {
        if label.trim().is_empty() {
            log::debug!("drop ignored: empty payload");
            return false;
        }
        let mut data = self
            .palette
            .find(label)
            .map(|t| t.instantiate())
            .unwrap_or_else(|| MachineData::new(label));
        if let Some(machine_id) = machine_id {
            data.machine_id = Some(machine_id.to_string());
        }
        self.state.add_node_with(NodeKind::Machine, data, position);
        true
    }

    /// Drop the drag if its node no longer exists.
    fn end_stale_drag(&mut self) {
        if let Some(drag) = self.drag
            && !self.state.contains(drag.id)
        {
            self.drag = None;
        }
    }

    fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            // Copying changes nothing visible.
            ShortcutAction::Copy => {
                self.state.copy_selected();
                false
            }
            ShortcutAction::Paste => !self.state.paste_clipboard().is_empty(),
            ShortcutAction::Delete => {
                let removed = self.state.delete_selected();
                self.end_stale_drag();
                removed > 0
            }
            ShortcutAction::Deselect => {
                let had_selection = self.state.selected_id().is_some();
                self.state.clear_selection();
                had_selection
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use fp_core::Size;
    use pretty_assertions::assert_eq;

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    fn drop_at(label: &str, x: f64, y: f64) -> InputEvent {
        InputEvent::Drop {
            label: label.into(),
            machine_id: None,
            x,
            y,
        }
    }

    /// Drop a machine and report its size, returning the new id.
    fn place(ctl: &mut CanvasController, x: f64, y: f64, w: f64, h: f64) -> NodeId {
        ctl.handle(&drop_at("Smelter", x, y));
        let id = ctl.state().nodes().last().unwrap().id;
        ctl.handle(&InputEvent::Measured {
            id,
            size: Size::new(w, h),
        });
        id
    }

    #[test]
    fn click_selects_and_opens_inspector() {
        let mut ctl = CanvasController::default();
        let a = place(&mut ctl, 0.0, 0.0, 100.0, 50.0);

        assert!(ctl.handle(&InputEvent::PointerDown { x: 10.0, y: 10.0 }));
        assert_eq!(ctl.state().selected_id(), Some(a));
        assert!(ctl.panels().inspector);
        assert_eq!(ctl.dragging(), Some(a));
    }

    #[test]
    fn click_empty_canvas_clears_selection() {
        let mut ctl = CanvasController::default();
        place(&mut ctl, 0.0, 0.0, 100.0, 50.0);
        ctl.handle(&InputEvent::PointerDown { x: 10.0, y: 10.0 });
        ctl.handle(&InputEvent::PointerUp { x: 10.0, y: 10.0 });

        assert!(ctl.handle(&InputEvent::PointerDown { x: 500.0, y: 500.0 }));
        assert_eq!(ctl.state().selected_id(), None);
        // Nothing left to clear.
        assert!(!ctl.handle(&InputEvent::PointerDown { x: 500.0, y: 500.0 }));
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut ctl = CanvasController::default();
        let a = place(&mut ctl, 0.0, 0.0, 100.0, 50.0);

        ctl.handle(&InputEvent::PointerDown { x: 10.0, y: 20.0 });
        ctl.handle(&InputEvent::PointerMove { x: 310.0, y: 220.0 });
        assert_eq!(ctl.state().node(a).unwrap().position, Point::new(300.0, 200.0));

        assert!(ctl.handle(&InputEvent::PointerUp { x: 310.0, y: 220.0 }));
        assert!(!ctl.handle(&InputEvent::PointerMove { x: 0.0, y: 0.0 }));
        assert_eq!(ctl.state().node(a).unwrap().position, Point::new(300.0, 200.0));
    }

    #[test]
    fn drag_snaps_and_exposes_guides() {
        let mut ctl = CanvasController::default();
        place(&mut ctl, 100.0, 100.0, 80.0, 40.0);
        let b = place(&mut ctl, 400.0, 400.0, 80.0, 40.0);

        ctl.handle(&InputEvent::PointerDown { x: 400.0, y: 400.0 });
        ctl.handle(&InputEvent::PointerMove { x: 102.0, y: 300.0 });
        assert_eq!(ctl.state().node(b).unwrap().position, Point::new(100.0, 300.0));
        assert_eq!(ctl.guides().x, Some(100.0));

        ctl.handle(&InputEvent::PointerUp { x: 102.0, y: 300.0 });
        assert!(ctl.guides().is_empty());
    }

    #[test]
    fn drop_inverse_projects_through_viewport() {
        let mut ctl = CanvasController::default();
        ctl.set_viewport(Viewport::new(Vec2::new(100.0, 50.0), 2.0));
        assert!(ctl.handle(&drop_at("Foundry", 300.0, 250.0)));

        let node = &ctl.state().nodes()[0];
        assert_eq!(node.data.label, "Foundry");
        assert!((node.position - Point::new(100.0, 100.0)).hypot() < 1e-9);
    }

    #[test]
    fn drop_with_empty_label_is_ignored() {
        let mut ctl = CanvasController::default();
        assert!(!ctl.handle(&drop_at("", 0.0, 0.0)));
        assert!(ctl.state().nodes().is_empty());
    }

    #[test]
    fn drop_carries_machine_id() {
        let mut ctl = CanvasController::default();
        ctl.handle(&InputEvent::Drop {
            label: "Blender".into(),
            machine_id: Some("m-42".into()),
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(ctl.state().nodes()[0].data.machine_id.as_deref(), Some("m-42"));
    }

    #[test]
    fn shortcuts_ignored_in_text_input() {
        let mut ctl = CanvasController::default();
        place(&mut ctl, 0.0, 0.0, 100.0, 50.0);
        ctl.handle(&InputEvent::PointerDown { x: 1.0, y: 1.0 });

        let typing = InputEvent::Key {
            key: "Backspace".into(),
            modifiers: Modifiers::NONE,
            in_text_input: true,
        };
        assert!(!ctl.handle(&typing));
        assert_eq!(ctl.state().nodes().len(), 1);
    }

    #[test]
    fn copy_paste_delete_via_keys() {
        let mut ctl = CanvasController::default();
        let a = place(&mut ctl, 0.0, 0.0, 100.0, 50.0);
        ctl.handle(&InputEvent::PointerDown { x: 1.0, y: 1.0 });
        ctl.handle(&InputEvent::PointerUp { x: 1.0, y: 1.0 });

        assert!(!ctl.handle(&InputEvent::key("c", CTRL)));
        assert!(ctl.handle(&InputEvent::key("v", CTRL)));
        assert_eq!(ctl.state().nodes().len(), 2);
        assert!(!ctl.state().node(a).unwrap().selected);

        // Deletes only the pasted (selected) copy.
        assert!(ctl.handle(&InputEvent::key("Delete", Modifiers::NONE)));
        assert_eq!(ctl.state().nodes().len(), 1);
        assert!(ctl.state().node(a).is_some());
    }

    #[test]
    fn delete_mid_drag_ends_drag() {
        let mut ctl = CanvasController::default();
        place(&mut ctl, 0.0, 0.0, 100.0, 50.0);
        ctl.handle(&InputEvent::PointerDown { x: 1.0, y: 1.0 });
        ctl.handle(&InputEvent::key("Backspace", Modifiers::NONE));
        assert_eq!(ctl.dragging(), None);
        assert!(!ctl.handle(&InputEvent::PointerMove { x: 50.0, y: 50.0 }));
    }

    #[test]
    fn inspector_delete_mid_drag_ends_drag() {
        let mut ctl = CanvasController::default();
        place(&mut ctl, 0.0, 0.0, 100.0, 50.0);
        ctl.handle(&InputEvent::PointerDown { x: 10.0, y: 10.0 });
        assert!(ctl.dragging().is_some());

        assert!(ctl.delete_inspected());
        assert_eq!(ctl.dragging(), None);
        assert_eq!(ctl.guides(), SnapGuides::default());
        assert!(!ctl.handle(&InputEvent::PointerMove { x: 50.0, y: 50.0 }));
        assert!(!ctl.delete_inspected());
    }

    #[test]
    fn move_after_binding_delete_is_not_a_change() {
        let mut ctl = CanvasController::default();
        place(&mut ctl, 0.0, 0.0, 100.0, 50.0);
        ctl.handle(&InputEvent::PointerDown { x: 10.0, y: 10.0 });

        // Deleting through the binding bypasses the controller's drag state.
        assert!(ctl.inspector().delete());
        assert!(!ctl.handle(&InputEvent::PointerMove { x: 50.0, y: 50.0 }));
        assert_eq!(ctl.dragging(), None);
    }

    #[test]
    fn connect_gesture() {
        let mut ctl = CanvasController::default();
        let a = place(&mut ctl, 0.0, 0.0, 100.0, 50.0);
        let b = place(&mut ctl, 300.0, 0.0, 100.0, 50.0);
        assert!(ctl.handle(&InputEvent::Connect { source: a, target: b }));
        assert!(!ctl.handle(&InputEvent::Connect {
            source: a,
            target: NodeId::intern("gone"),
        }));
        assert_eq!(ctl.state().edges().len(), 1);
    }

    #[test]
    fn panels_toggle() {
        let mut ctl = CanvasController::default();
        assert_eq!(ctl.panels(), Panels::default());
        ctl.toggle_sidebar();
        assert!(!ctl.panels().sidebar);
        place(&mut ctl, 0.0, 0.0, 10.0, 10.0);
        ctl.handle(&InputEvent::PointerDown { x: 1.0, y: 1.0 });
        assert!(ctl.panels().inspector);
        ctl.close_inspector();
        assert!(!ctl.panels().inspector);
    }

    #[test]
    fn measured_unknown_node_is_ignored() {
        let mut ctl = CanvasController::default();
        assert!(!ctl.handle(&InputEvent::Measured {
            id: NodeId::intern("never_dropped"),
            size: Size::new(1.0, 1.0),
        }));
    }
}
