//! # Planner Report Module
//!
//! Reads recipe and inventory JSON files and builds the combined report the
//! binary prints: per-recipe nutrition and availability, ranked, plus a
//! merged shopping list.

use crate::ingredient_model::Recipe;
use crate::inventory_matcher::{availability_order, InventoryMatcher, RecipeAvailability};
use crate::inventory_model::InventoryItem;
use crate::nutrition_aggregator::{NutritionAggregator, RecipeNutrition};
use crate::planner_config::PlannerConfig;
use crate::shopping_list::{build_shopping_list, ShoppingListEntry};
use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One recipe's line in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeReport {
    pub recipe_id: String,
    pub title: String,
    /// Absent for a recipe without ingredients
    pub nutrition: Option<RecipeNutrition>,
    pub availability: RecipeAvailability,
}

/// Full report for a recipe collection against one inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerReport {
    pub language: String,
    /// Ready-to-cook first, then by availability
    pub recipes: Vec<RecipeReport>,
    pub shopping_list: Vec<ShoppingListEntry>,
}

/// Load a JSON array of recipes
pub fn load_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let recipes: Vec<Recipe> = load_json(path)?;
    info!("Loaded {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// Load a JSON array of inventory items
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryItem>> {
    let inventory: Vec<InventoryItem> = load_json(path)?;
    info!("Loaded {} inventory items from {}", inventory.len(), path.display());
    Ok(inventory)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Build the report
pub fn build_report(
    recipes: &[Recipe],
    inventory: &[InventoryItem],
    config: &PlannerConfig,
) -> PlannerReport {
    let aggregator = NutritionAggregator::with_config(config.servings.clone());
    let matcher = InventoryMatcher::new().with_language(&config.language);

    let mut scored: Vec<(&Recipe, RecipeAvailability)> = recipes
        .iter()
        .map(|recipe| (recipe, matcher.calculate_recipe_availability(recipe, inventory)))
        .collect();
    scored.sort_by(|(_, a), (_, b)| availability_order(a, b));

    let availabilities: Vec<RecipeAvailability> =
        scored.iter().map(|(_, availability)| availability.clone()).collect();
    let shopping_list = build_shopping_list(&availabilities);

    let recipes = scored
        .into_iter()
        .map(|(recipe, availability)| RecipeReport {
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            nutrition: aggregator.compute_for_external_recipe(recipe),
            availability,
        })
        .collect();

    PlannerReport {
        language: config.language.clone(),
        recipes,
        shopping_list,
    }
}
