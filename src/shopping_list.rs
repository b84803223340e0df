//! # Shopping List Module
//!
//! Merges the missing ingredients of several recipe availability results
//! into one list ("Add All").

use crate::inventory_matcher::{normalize_ingredient_name, RecipeAvailability};
use log::debug;
use serde::{Deserialize, Serialize};

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    /// Name as first seen
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Recipes that need this entry, in first-seen order
    pub recipe_ids: Vec<String>,
}

/// Merge missing ingredients across recipes.
///
/// Entries with the same normalized name and the same unit (ignoring case)
/// are combined and their shortfalls summed; a different unit starts a new
/// line. Output keeps first-seen order.
pub fn build_shopping_list(availabilities: &[RecipeAvailability]) -> Vec<ShoppingListEntry> {
    let mut entries: Vec<(String, ShoppingListEntry)> = Vec::new();

    for availability in availabilities {
        for missing in &availability.missing_ingredients {
            let key = normalize_ingredient_name(&missing.name);
            let unit = missing.required_unit.trim();

            match entries
                .iter_mut()
                .find(|(k, entry)| *k == key && entry.unit.eq_ignore_ascii_case(unit))
            {
                Some((_, entry)) => {
                    entry.quantity += missing.shortfall;
                    if !entry.recipe_ids.contains(&availability.recipe_id) {
                        entry.recipe_ids.push(availability.recipe_id.clone());
                    }
                }
                None => entries.push((
                    key,
                    ShoppingListEntry {
                        name: missing.name.clone(),
                        quantity: missing.shortfall,
                        unit: unit.to_string(),
                        recipe_ids: vec![availability.recipe_id.clone()],
                    },
                )),
            }
        }
    }

    debug!("Shopping list has {} entries", entries.len());
    entries.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory_matcher::MissingIngredient;

    fn missing(name: &str, quantity: f64, unit: &str) -> MissingIngredient {
        MissingIngredient {
            name: name.to_string(),
            required_quantity: quantity,
            required_unit: unit.to_string(),
            available_quantity: 0.0,
            shortfall: quantity,
        }
    }

    fn availability(id: &str, missing_ingredients: Vec<MissingIngredient>) -> RecipeAvailability {
        RecipeAvailability {
            recipe_id: id.to_string(),
            available_ingredients: 0,
            total_ingredients: missing_ingredients.len(),
            availability_percentage: 0,
            missing_ingredients,
            can_cook_now: false,
            recommendation_reason: String::new(),
        }
    }

    #[test]
    fn test_merges_same_unit() {
        let list = build_shopping_list(&[
            availability("a", vec![missing("Milk", 200.0, "ml"), missing("Sugar", 50.0, "g")]),
            availability("b", vec![missing("milk", 300.0, "ML")]),
        ]);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Milk");
        assert_eq!(list[0].quantity, 500.0);
        assert_eq!(list[0].recipe_ids, vec!["a", "b"]);
        assert_eq!(list[1].name, "Sugar");
    }

    #[test]
    fn test_different_units_stay_separate() {
        let list = build_shopping_list(&[
            availability("a", vec![missing("flour", 2.0, "cups")]),
            availability("b", vec![missing("flour", 250.0, "g")]),
        ]);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].unit, "cups");
        assert_eq!(list[1].unit, "g");
    }

    #[test]
    fn test_modifiers_merge() {
        let list = build_shopping_list(&[
            availability("a", vec![missing("fresh parsley", 1.0, "bunch")]),
            availability("a", vec![missing("Parsley, chopped", 1.0, "bunch")]),
        ]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].quantity, 2.0);
        assert_eq!(list[0].recipe_ids, vec!["a"]);
    }

    #[test]
    fn test_empty() {
        assert!(build_shopping_list(&[]).is_empty());
    }
}
