//! Machine palette shown in the sidebar.
//!
//! Entries are dragged onto the canvas; the drop carries the template's
//! label (and backend id, when known). When the catalog backend is
//! unreachable the sidebar falls back to [`Palette::fallback`].

use fp_core::MachineData;
use serde::{Deserialize, Serialize};

/// One draggable palette entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineTemplate {
    /// Stable key (backend id, or a slug for built-in templates).
    pub id: String,
    pub name: String,
    /// Backend machine id; `None` for built-in templates.
    #[serde(default)]
    pub machine_id: Option<String>,
    /// Crafting speed multiplier advertised by the backend.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl MachineTemplate {
    fn builtin(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            machine_id: None,
            multiplier: 1.0,
        }
    }

    /// Initial node data for a drop of this template.
    pub fn instantiate(&self) -> MachineData {
        let mut data = MachineData::new(self.name.clone());
        data.machine_id = self.machine_id.clone();
        data
    }
}

/// Where the palette entries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteSource {
    Builtin,
    Backend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub source: PaletteSource,
    pub templates: Vec<MachineTemplate>,
}

impl Palette {
    /// The static template list used when the backend is unavailable.
    pub fn fallback() -> Self {
        Self {
            source: PaletteSource::Builtin,
            templates: vec![
                MachineTemplate::builtin("smelter", "Smelter"),
                MachineTemplate::builtin("constructor", "Constructor"),
                MachineTemplate::builtin("assembler", "Assembler"),
                MachineTemplate::builtin("manufacturer", "Manufacturer"),
                MachineTemplate::builtin("foundry", "Foundry"),
                MachineTemplate::builtin("refinery", "Refinery"),
            ],
        }
    }

    /// Palette built from backend machines. An empty list still counts as
    /// a backend answer, so the sidebar shows an empty library rather than
    /// the built-ins.
    pub fn from_backend(templates: Vec<MachineTemplate>) -> Self {
        Self {
            source: PaletteSource::Backend,
            templates,
        }
    }

    /// Look up a template by its drag label.
    pub fn find(&self, name: &str) -> Option<&MachineTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::fallback()
    }
}
