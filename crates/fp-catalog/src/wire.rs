//! JSON shapes exchanged with the catalog backend.
//!
//! Ids are assigned by the server on create, so they are optional on the
//! way out and always present on the way back.

use serde::{Deserialize, Serialize};

/// A machine type that can be placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Crafting speed multiplier.
    #[serde(default = "one")]
    pub multiplier: f64,
    /// Image URL or data URI; empty when none was uploaded.
    #[serde(default)]
    pub image: String,
}

fn one() -> f64 {
    1.0
}

/// A tradeable item (ore, ingot, part...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

/// One input or output line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIo {
    pub item_id: String,
    pub amount: f64,
    /// Resolved item, present when the server expands line items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

impl RecipeIo {
    pub fn new(item_id: impl Into<String>, amount: f64) -> Self {
        Self {
            item_id: item_id.into(),
            amount,
            item: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub machine_id: String,
    pub craft_time_seconds: f64,
    #[serde(default, alias = "recipe_inputs")]
    pub inputs: Vec<RecipeIo>,
    #[serde(default, alias = "recipe_outputs")]
    pub outputs: Vec<RecipeIo>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn machine_defaults() {
        let m: Machine = serde_json::from_str(r#"{ "id": "m1", "name": "Smelter" }"#).unwrap();
        assert_eq!(m.multiplier, 1.0);
        assert_eq!(m.image, "");
    }

    #[test]
    fn new_machine_omits_id() {
        let m = Machine {
            id: None,
            name: "Smelter".into(),
            multiplier: 1.5,
            image: String::new(),
        };
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["multiplier"], 1.5);
    }

    #[test]
    fn recipe_accepts_expanded_line_items() {
        let json = r#"{
            "id": "r1",
            "name": "Iron Ingot",
            "machine_id": "m1",
            "craft_time_seconds": 2.0,
            "recipe_inputs": [
                { "item_id": "ore", "amount": 1, "item": { "id": "ore", "name": "Iron Ore", "value": 1 } }
            ],
            "recipe_outputs": [ { "item_id": "ingot", "amount": 1 } ]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.inputs.len(), 1);
        assert_eq!(recipe.inputs[0].item.as_ref().unwrap().name, "Iron Ore");
        assert_eq!(recipe.outputs[0], RecipeIo::new("ingot", 1.0));
    }
}
