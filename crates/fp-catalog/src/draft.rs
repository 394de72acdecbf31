//! Editable recipe form state, before it is posted to the backend.

use crate::error::CatalogError;
use crate::wire::{Item, Recipe, RecipeIo};

/// Maximum number of item-search hits shown under the search box.
pub const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoSide {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub machine_id: String,
    pub craft_time_seconds: f64,
    pub inputs: Vec<RecipeIo>,
    pub outputs: Vec<RecipeIo>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            machine_id: String::new(),
            craft_time_seconds: 1.0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

impl RecipeDraft {
    pub fn new(machine_id: impl Into<String>) -> Self {
        Self {
            machine_id: machine_id.into(),
            ..Default::default()
        }
    }

    fn side(&self, side: IoSide) -> &Vec<RecipeIo> {
        match side {
            IoSide::Input => &self.inputs,
            IoSide::Output => &self.outputs,
        }
    }

    fn side_mut(&mut self, side: IoSide) -> &mut Vec<RecipeIo> {
        match side {
            IoSide::Input => &mut self.inputs,
            IoSide::Output => &mut self.outputs,
        }
    }

    /// Add an item with amount 1. Returns `false` if it is already listed
    /// on that side.
    pub fn add(&mut self, side: IoSide, item_id: &str) -> bool {
        let rows = self.side_mut(side);
        if rows.iter().any(|r| r.item_id == item_id) {
            return false;
        }
        rows.push(RecipeIo::new(item_id, 1.0));
        true
    }

    pub fn set_amount(&mut self, side: IoSide, item_id: &str, amount: f64) -> bool {
        match self.side_mut(side).iter_mut().find(|r| r.item_id == item_id) {
            Some(row) => {
                row.amount = amount;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, side: IoSide, item_id: &str) -> bool {
        let rows = self.side_mut(side);
        let before = rows.len();
        rows.retain(|r| r.item_id != item_id);
        rows.len() != before
    }

    /// Items per second for `amount` at the current craft time. A zero or
    /// NaN craft time is treated as one second.
    pub fn rate(&self, amount: f64) -> f64 {
        let time = if self.craft_time_seconds == 0.0 || self.craft_time_seconds.is_nan() {
            1.0
        } else {
            self.craft_time_seconds
        };
        amount / time
    }

    /// Per-second rates for one side, in row order.
    pub fn rates(&self, side: IoSide) -> Vec<(String, f64)> {
        self.side(side)
            .iter()
            .map(|r| (r.item_id.clone(), self.rate(r.amount)))
            .collect()
    }

    /// Validate and convert into the create payload.
    pub fn into_new_recipe(self) -> Result<Recipe, CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::InvalidDraft("recipe name is required".into()));
        }
        if self.machine_id.is_empty() {
            return Err(CatalogError::InvalidDraft("machine id is required".into()));
        }
        if self.outputs.is_empty() {
            return Err(CatalogError::InvalidDraft(
                "at least one output is required".into(),
            ));
        }
        Ok(Recipe {
            id: None,
            name: self.name,
            machine_id: self.machine_id,
            craft_time_seconds: self.craft_time_seconds,
            inputs: self.inputs,
            outputs: self.outputs,
        })
    }
}

/// Case-insensitive substring search over item names, at most
/// [`SEARCH_LIMIT`] hits. An empty query matches nothing.
pub fn search_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .take(SEARCH_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(name: &str) -> Item {
        Item {
            id: Some(name.to_lowercase()),
            name: name.to_string(),
            value: 1.0,
        }
    }

    #[test]
    fn add_ignores_duplicates_per_side() {
        let mut draft = RecipeDraft::new("m1");
        assert!(draft.add(IoSide::Input, "ore"));
        assert!(!draft.add(IoSide::Input, "ore"));
        assert!(draft.add(IoSide::Output, "ore"));
        assert_eq!(draft.inputs, vec![RecipeIo::new("ore", 1.0)]);
        assert_eq!(draft.outputs.len(), 1);
    }

    #[test]
    fn amount_and_remove() {
        let mut draft = RecipeDraft::new("m1");
        draft.add(IoSide::Output, "plate");
        assert!(draft.set_amount(IoSide::Output, "plate", 3.0));
        assert!(!draft.set_amount(IoSide::Input, "plate", 3.0));
        assert_eq!(draft.outputs[0].amount, 3.0);
        assert!(draft.remove(IoSide::Output, "plate"));
        assert!(!draft.remove(IoSide::Output, "plate"));
        assert!(draft.outputs.is_empty());
    }

    #[test]
    fn rate_per_second() {
        let mut draft = RecipeDraft::new("m1");
        draft.craft_time_seconds = 4.0;
        draft.add(IoSide::Input, "ore");
        draft.set_amount(IoSide::Input, "ore", 2.0);
        assert_eq!(draft.rates(IoSide::Input), vec![("ore".to_string(), 0.5)]);

        draft.craft_time_seconds = 0.0;
        assert_eq!(draft.rate(2.0), 2.0);
        draft.craft_time_seconds = f64::NAN;
        assert_eq!(draft.rate(2.0), 2.0);
    }

    #[test]
    fn search_is_case_insensitive_and_capped() {
        let items: Vec<Item> = ["Iron Ore", "Iron Ingot", "Iron Plate", "Iron Rod", "Reinforced Iron Plate", "Iron Screw", "Copper Ore"]
            .into_iter()
            .map(item)
            .collect();
        let hits = search_items(&items, "IRON");
        assert_eq!(hits.len(), 5);
        assert_eq!(hits[0].name, "Iron Ore");
        assert_eq!(search_items(&items, "copper")[0].name, "Copper Ore");
        assert!(search_items(&items, "").is_empty());
        assert!(search_items(&items, "  ").is_empty());
    }

    #[test]
    fn new_recipe_requires_name_machine_and_output() {
        let draft = RecipeDraft::new("m1");
        assert!(matches!(draft.into_new_recipe(), Err(CatalogError::InvalidDraft(_))));

        let draft = RecipeDraft {
            name: "Iron Plate".into(),
            ..Default::default()
        };
        assert!(matches!(draft.into_new_recipe(), Err(CatalogError::InvalidDraft(_))));

        let mut draft = RecipeDraft::new("m1");
        draft.name = "Iron Plate".into();
        draft.craft_time_seconds = 6.0;
        draft.add(IoSide::Input, "ingot");
        let err = draft.clone().into_new_recipe().unwrap_err();
        assert_eq!(err.to_string(), "invalid recipe draft: at least one output is required");

        draft.add(IoSide::Output, "plate");
        let recipe = draft.into_new_recipe().unwrap();
        assert_eq!(recipe.id, None);
        assert_eq!(recipe.machine_id, "m1");
        assert_eq!(recipe.inputs, vec![RecipeIo::new("ingot", 1.0)]);
    }
}
