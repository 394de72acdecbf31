//! Editing engine for the factory canvas.
//!
//! Events flow one way: host input → [`controller::CanvasController`] →
//! [`state::GraphState`] (the only mutator) → host re-render. The
//! [`inspector::InspectorBinding`] edits the selected node through the
//! same state.

pub mod config;
pub mod controller;
pub mod input;
pub mod inspector;
pub mod palette;
pub mod shortcuts;
pub mod state;
pub mod viewport;

pub use config::EditorConfig;
pub use controller::{CanvasController, Panels};
pub use input::{InputEvent, Modifiers};
pub use inspector::{FieldEdit, InspectorBinding, InspectorView, RECIPE_CATALOG, RecipePreset};
pub use palette::{MachineTemplate, Palette};
pub use state::GraphState;
pub use viewport::Viewport;
