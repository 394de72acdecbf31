//! Inspector: a live, one-way projection of the selected machine.
//!
//! There is no draft buffer. Each edit goes straight to
//! [`GraphState::update_node_data`], and the next [`InspectorBinding::view`]
//! reflects it.

use crate::state::GraphState;
use fp_core::{IDLE_RECIPE, MachineDataPatch, MachineStatus, NodeId};
use serde::Serialize;

/// A built-in recipe: name, speed multiplier, power draw (MW).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipePreset {
    pub name: &'static str,
    pub speed: f64,
    pub energy: f64,
}

/// Recipes offered when a machine has none configured.
pub const RECIPE_CATALOG: &[RecipePreset] = &[
    RecipePreset { name: "Iron Ingot", speed: 1.0, energy: 4.0 },
    RecipePreset { name: "Copper Ingot", speed: 1.0, energy: 4.0 },
    RecipePreset { name: "Iron Plate", speed: 0.5, energy: 6.0 },
    RecipePreset { name: "Iron Rod", speed: 1.0, energy: 5.0 },
    RecipePreset { name: "Screw", speed: 2.0, energy: 7.0 },
];

/// What the inspector panel renders for the selected node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectorView {
    pub id: NodeId,
    pub label: String,
    pub recipe: String,
    pub speed: f64,
    pub energy: f64,
    pub status: MachineStatus,
    /// A real recipe is set; otherwise the panel lists [`RECIPE_CATALOG`].
    pub recipe_active: bool,
}

/// A single-field edit from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Label(String),
    Speed(f64),
    Energy(f64),
    Status(MachineStatus),
}

impl From<FieldEdit> for MachineDataPatch {
    fn from(edit: FieldEdit) -> Self {
        match edit {
            FieldEdit::Label(label) => Self {
                label: Some(label),
                ..Default::default()
            },
            FieldEdit::Speed(speed) => Self {
                speed: Some(speed),
                ..Default::default()
            },
            FieldEdit::Energy(energy) => Self {
                energy: Some(energy),
                ..Default::default()
            },
            FieldEdit::Status(status) => Self {
                status: Some(status),
                ..Default::default()
            },
        }
    }
}

pub struct InspectorBinding<'a> {
    state: &'a mut GraphState,
}

impl<'a> InspectorBinding<'a> {
    pub fn new(state: &'a mut GraphState) -> Self {
        Self { state }
    }

    fn target(&self) -> Option<NodeId> {
        self.state.selected_id()
    }

    /// Project the selected node, or `None` when nothing is selected.
    pub fn view(&self) -> Option<InspectorView> {
        let node = self.state.node(self.target()?)?;
        Some(InspectorView {
            id: node.id,
            label: node.data.label.clone(),
            recipe: node.data.recipe.clone(),
            speed: node.data.speed,
            energy: node.data.energy,
            status: node.data.status,
            recipe_active: node.data.has_recipe(),
        })
    }

    /// Apply a catalog recipe: sets recipe, speed and energy, and marks the
    /// machine optimal. Returns `false` for an unknown recipe or when
    /// nothing is selected.
    pub fn select_recipe(&mut self, name: &str) -> bool {
        let Some(preset) = RECIPE_CATALOG.iter().find(|r| r.name == name) else {
            log::debug!("unknown recipe {name:?}");
            return false;
        };
        let Some(id) = self.target() else {
            return false;
        };
        self.state.update_node_data(
            id,
            &MachineDataPatch {
                recipe: Some(preset.name.to_string()),
                speed: Some(preset.speed),
                energy: Some(preset.energy),
                status: Some(MachineStatus::Optimal),
                ..Default::default()
            },
        );
        true
    }

    /// Reset the recipe to idle. Status is left as it was.
    pub fn clear_recipe(&mut self) -> bool {
        let Some(id) = self.target() else {
            return false;
        };
        self.state.update_node_data(
            id,
            &MachineDataPatch {
                recipe: Some(IDLE_RECIPE.to_string()),
                ..Default::default()
            },
        );
        true
    }

    pub fn set_field(&mut self, edit: FieldEdit) -> bool {
        let Some(id) = self.target() else {
            return false;
        };
        self.state.update_node_data(id, &edit.into());
        true
    }

    /// Delete the inspected node (the panel's trash button).
    pub fn delete(&mut self) -> bool {
        match self.target() {
            Some(id) => self.state.remove_node(id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use fp_core::{NodeKind, Point};
    use pretty_assertions::assert_eq;

    fn selected_state() -> (GraphState, NodeId) {
        let mut gs = GraphState::new(EditorConfig::default());
        let id = gs.add_node(NodeKind::Machine, "Smelter", Point::ZERO);
        gs.select_node(id);
        (gs, id)
    }

    #[test]
    fn no_selection_no_view() {
        let mut gs = GraphState::new(EditorConfig::default());
        gs.add_node(NodeKind::Machine, "Smelter", Point::ZERO);
        let mut inspector = InspectorBinding::new(&mut gs);
        assert!(inspector.view().is_none());
        assert!(!inspector.select_recipe("Screw"));
        assert!(!inspector.clear_recipe());
        assert!(!inspector.delete());
    }

    #[test]
    fn view_projects_selected_node() {
        let (mut gs, id) = selected_state();
        let inspector = InspectorBinding::new(&mut gs);
        let view = inspector.view().unwrap();
        assert_eq!(view.id, id);
        assert_eq!(view.label, "Smelter");
        assert_eq!(view.recipe, "Idle");
        assert!(!view.recipe_active);
    }

    #[test]
    fn select_recipe_forces_optimal() {
        let (mut gs, id) = selected_state();
        let mut inspector = InspectorBinding::new(&mut gs);
        assert!(inspector.select_recipe("Iron Plate"));

        let data = &gs.node(id).unwrap().data;
        assert_eq!(data.recipe, "Iron Plate");
        assert_eq!(data.speed, 0.5);
        assert_eq!(data.energy, 6.0);
        assert_eq!(data.status, MachineStatus::Optimal);
    }

    #[test]
    fn unknown_recipe_is_rejected() {
        let (mut gs, id) = selected_state();
        let mut inspector = InspectorBinding::new(&mut gs);
        assert!(!inspector.select_recipe("Unobtainium"));
        assert_eq!(gs.node(id).unwrap().data.recipe, "Idle");
    }

    #[test]
    fn clear_recipe_keeps_status() {
        let (mut gs, id) = selected_state();
        let mut inspector = InspectorBinding::new(&mut gs);
        inspector.select_recipe("Screw");
        assert!(inspector.clear_recipe());

        let view = inspector.view().unwrap();
        assert_eq!(view.recipe, "Idle");
        assert!(!view.recipe_active);
        // Speed, energy and status stay from the previous recipe.
        assert_eq!(view.status, MachineStatus::Optimal);
        assert_eq!(view.speed, 2.0);
        assert_eq!(gs.node(id).unwrap().data.energy, 7.0);
    }

    #[test]
    fn field_edits_are_live() {
        let (mut gs, _) = selected_state();
        let mut inspector = InspectorBinding::new(&mut gs);
        inspector.set_field(FieldEdit::Label("Smelter #2".into()));
        inspector.set_field(FieldEdit::Status(MachineStatus::Bottleneck));
        let view = inspector.view().unwrap();
        assert_eq!(view.label, "Smelter #2");
        assert_eq!(view.status, MachineStatus::Bottleneck);
        assert_eq!(view.recipe, "Idle");
    }

    #[test]
    fn delete_removes_inspected_node() {
        let (mut gs, id) = selected_state();
        let mut inspector = InspectorBinding::new(&mut gs);
        assert!(inspector.delete());
        assert!(inspector.view().is_none());
        assert!(gs.node(id).is_none());
    }
}
