//! Canvas data model for factory layouts.
//!
//! A layout is a flat, ordered list of machine [`Node`]s plus a list of
//! directed [`Edge`]s describing material flow. Order matters: it is the
//! paint order (last = topmost) and the iteration order used by snapping.
//! Edges carry no semantic validation; cycles and duplicates are allowed.

use crate::id::{EdgeId, NodeId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Recipe name shown on a machine that has nothing configured.
pub const IDLE_RECIPE: &str = "Idle";

/// Alternate "nothing configured" label some saved layouts use.
pub const NO_RECIPE_SELECTED: &str = "No Recipe Selected";

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let channel = |i: usize| -> Option<f32> {
            let v = hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?;
            Some(v as f32 / 255.0)
        };

        match bytes.len() {
            6 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 1.0)),
            8 => Some(Self::rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Machine data ────────────────────────────────────────────────────────

/// Throughput status of a machine, shown as the node's border color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Optimal,
    Bottleneck,
    #[default]
    Idle,
}

/// Per-node configuration edited through the inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineData {
    /// Display name, e.g. "Smelter".
    pub label: String,
    /// Backend machine this node was instantiated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    pub recipe: String,
    /// Crafting speed multiplier.
    pub speed: f64,
    /// Power draw in MW.
    pub energy: f64,
    pub status: MachineStatus,
}

impl MachineData {
    /// Defaults for a machine freshly dropped from the palette.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            machine_id: None,
            recipe: IDLE_RECIPE.to_string(),
            speed: 1.0,
            energy: 5.0,
            status: MachineStatus::Idle,
        }
    }

    /// Whether a real recipe is configured.
    pub fn has_recipe(&self) -> bool {
        self.recipe != IDLE_RECIPE && self.recipe != NO_RECIPE_SELECTED
    }

    /// Merge `patch` into this data, overwriting only `Some` fields.
    pub fn apply(&mut self, patch: &MachineDataPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(machine_id) = &patch.machine_id {
            self.machine_id = Some(machine_id.clone());
        }
        if let Some(recipe) = &patch.recipe {
            self.recipe = recipe.clone();
        }
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
        if let Some(energy) = patch.energy {
            self.energy = energy;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// A partial update to [`MachineData`]. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineDataPatch {
    pub label: Option<String>,
    pub machine_id: Option<String>,
    pub recipe: Option<String>,
    pub speed: Option<f64>,
    pub energy: Option<f64>,
    pub status: Option<MachineStatus>,
}

impl MachineDataPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The node kinds a layout can hold. Only machines exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Machine,
}

/// A machine placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Top-left corner in canvas space.
    pub position: Point,
    /// Pixel size reported by the renderer; `None` until first paint.
    #[serde(default)]
    pub measured: Option<Size>,
    pub data: MachineData,
    #[serde(default)]
    pub selected: bool,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, position: Point, data: MachineData) -> Self {
        Self {
            id,
            kind,
            position,
            measured: None,
            data,
            selected: false,
        }
    }

    /// Canvas-space bounding box, once the node has been measured.
    pub fn bounds(&self) -> Option<Rect> {
        self.measured
            .map(|size| Rect::from_origin_size(self.position, size))
    }

    /// Whether `p` falls inside the node (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().is_some_and(|b| {
            p.x >= b.x0 && p.x <= b.x1 && p.y >= b.y0 && p.y <= b.y1
        })
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// Stroke color for user-drawn connections (orange-400).
pub const DEFAULT_EDGE_STROKE: Color = Color::rgba(251.0 / 255.0, 146.0 / 255.0, 60.0 / 255.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub stroke: Color,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_EDGE_STROKE,
        }
    }
}

/// A directed material-flow connection from one machine's output to
/// another's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Flow animation along the edge path.
    pub animated: bool,
    pub style: EdgeStyle,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            animated: true,
            style: EdgeStyle::default(),
        }
    }
}
