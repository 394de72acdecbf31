//! WASM bridge for the factory planner, exposing the editing engine to the
//! browser host.
//!
//! Compiled via `wasm-pack build --target web`. The host owns rendering: it
//! calls the `handle_*` methods with raw DOM input, re-renders whenever one
//! returns `true`, and reads graph snapshots back as JSON.

use fp_core::{NodeId, Size, Vec2};
use fp_editor::input::{InputEvent, Modifiers};
use fp_editor::inspector::FieldEdit;
use fp_editor::{CanvasController, EditorConfig, Palette, Viewport};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The canvas editor as seen from JavaScript.
#[wasm_bindgen]
pub struct FactoryCanvas {
    controller: CanvasController,
}

impl Default for FactoryCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl FactoryCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            controller: CanvasController::new(EditorConfig::default()),
        }
    }

    /// Build a canvas from a JSON [`EditorConfig`]. Invalid config falls
    /// back to the defaults.
    pub fn with_config(json: &str) -> Self {
        console_error_panic_hook_setup();
        let config = EditorConfig::from_json(json).unwrap_or_else(|e| {
            log::warn!("{e}; using default editor config");
            EditorConfig::default()
        });
        Self {
            controller: CanvasController::new(config),
        }
    }

    // ─── Pointer / drag-and-drop ─────────────────────────────────────────

    /// Pointer down in screen space. Returns true if the graph changed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(&InputEvent::PointerDown { x, y })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(&InputEvent::PointerMove { x, y })
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.controller.handle(&InputEvent::PointerUp { x, y })
    }

    /// A palette entry was dropped at screen `(x, y)`. `machine_id` is
    /// empty for built-in templates.
    pub fn handle_drop(&mut self, label: &str, machine_id: &str, x: f64, y: f64) -> bool {
        let machine_id = (!machine_id.is_empty()).then(|| machine_id.to_string());
        self.controller.handle(&InputEvent::Drop {
            label: label.to_string(),
            machine_id,
            x,
            y,
        })
    }

    pub fn handle_connect(&mut self, source: &str, target: &str) -> bool {
        self.controller.handle(&InputEvent::Connect {
            source: NodeId::intern(source),
            target: NodeId::intern(target),
        })
    }

    /// The host measured a node's rendered box.
    pub fn handle_measured(&mut self, id: &str, width: f64, height: f64) -> bool {
        self.controller.handle(&InputEvent::Measured {
            id: NodeId::intern(id),
            size: Size::new(width, height),
        })
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Keyboard event. `in_text_input` is true when focus is in a form
    /// field, in which case canvas shortcuts are suppressed.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        in_text_input: bool,
    ) -> bool {
        self.controller.handle(&InputEvent::Key {
            key: key.to_string(),
            modifiers: Modifiers {
                ctrl,
                shift,
                alt,
                meta,
            },
            in_text_input,
        })
    }

    // ─── Viewport / panels ───────────────────────────────────────────────

    pub fn set_viewport(&mut self, pan_x: f64, pan_y: f64, zoom: f64) {
        self.controller
            .set_viewport(Viewport::new(Vec2::new(pan_x, pan_y), zoom));
    }

    pub fn toggle_sidebar(&mut self) {
        self.controller.toggle_sidebar();
    }

    pub fn close_inspector(&mut self) {
        self.controller.close_inspector();
    }

    pub fn sidebar_open(&self) -> bool {
        self.controller.panels().sidebar
    }

    pub fn inspector_open(&self) -> bool {
        self.controller.panels().inspector
    }

    // ─── Palette ─────────────────────────────────────────────────────────

    /// Replace the palette with a JSON [`Palette`] fetched by the host.
    /// Returns false (keeping the current palette) on a parse error.
    pub fn set_palette_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Palette>(json) {
            Ok(palette) => {
                self.controller.set_palette(palette);
                true
            }
            Err(e) => {
                log::warn!("invalid palette JSON: {e}");
                false
            }
        }
    }

    pub fn get_palette_json(&self) -> String {
        to_json(self.controller.palette(), "null")
    }

    // ─── Inspector ───────────────────────────────────────────────────────

    /// The selected machine as JSON, or `null` when nothing is selected.
    pub fn get_inspector_json(&mut self) -> String {
        match self.controller.inspector().view() {
            Some(view) => to_json(&view, "null"),
            None => "null".to_string(),
        }
    }

    pub fn select_recipe(&mut self, name: &str) -> bool {
        self.controller.inspector().select_recipe(name)
    }

    pub fn clear_recipe(&mut self) -> bool {
        self.controller.inspector().clear_recipe()
    }

    /// Set one inspector field. `key` is one of `label`, `speed`, `energy`
    /// or `status`; numbers arrive as strings from the form inputs.
    pub fn set_field(&mut self, key: &str, value: &str) -> bool {
        let Some(edit) = parse_field(key, value) else {
            log::debug!("ignored inspector edit {key}={value:?}");
            return false;
        };
        self.controller.inspector().set_field(edit)
    }

    pub fn delete_inspected(&mut self) -> bool {
        self.controller.delete_inspected()
    }

    // ─── Snapshots ───────────────────────────────────────────────────────

    pub fn get_nodes_json(&self) -> String {
        to_json(self.controller.state().nodes(), "[]")
    }

    pub fn get_edges_json(&self) -> String {
        to_json(self.controller.state().edges(), "[]")
    }

    pub fn get_selected_id(&self) -> String {
        self.controller
            .state()
            .selected_id()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// All selected node ids as a JSON array, in paint order.
    pub fn get_selected_ids_json(&self) -> String {
        let selected = self.controller.state().selected_ids();
        let ids: Vec<&str> = selected
            .iter()
            .map(|id| id.as_str())
            .collect();
        to_json(&ids, "[]")
    }

    /// Alignment guides to draw while dragging, as `{"x":..,"y":..}`.
    pub fn get_guides_json(&self) -> String {
        let guides = self.controller.guides();
        serde_json::json!({ "x": guides.x, "y": guides.y }).to_string()
    }
}

fn parse_field(key: &str, value: &str) -> Option<FieldEdit> {
    match key {
        "label" => Some(FieldEdit::Label(value.to_string())),
        "speed" => parse_finite(value).map(FieldEdit::Speed),
        "energy" => parse_finite(value).map(FieldEdit::Energy),
        "status" => serde_json::from_value(serde_json::Value::String(value.to_string()))
            .ok()
            .map(FieldEdit::Status),
        _ => None,
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("factory canvas panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
