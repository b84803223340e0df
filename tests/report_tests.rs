//! # Report Tests
//!
//! JSON file loading and report assembly, using scratch files.

use anyhow::{Context, Result};
use mealwise::planner_config::PlannerConfig;
use mealwise::report::{build_report, load_inventory, load_recipes};
use std::io::Write;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> Result<NamedTempFile> {
        let mut temp_file = NamedTempFile::new().context("Failed to create temp file")?;
        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write temp file")?;
        Ok(temp_file)
    }

    const RECIPES: &str = r#"[
        {"id": "omelette", "title": "Omelette", "servings": 2,
         "ingredients": ["4 eggs", {"name": "cheddar", "amount": 40, "unit": "g"}]},
        {"id": 7, "name": "Tomato Pasta",
         "ingredients": [
            {"name": "pasta", "amount": 250, "unit": "g"},
            {"name": "canned tomatoes", "quantity": 1, "unit": "can"},
            {"name": "basil", "unit": "bunch", "amount": 1}
         ]}
    ]"#;

    const INVENTORY: &str = r#"[
        {"id": "a", "name": "Free-range Eggs", "quantity": 6, "unit": "pcs",
         "category": "Dairy", "expiryDate": "2026-10-25"},
        {"id": "b", "name": "Mature Cheddar", "quantity": 200, "unit": "g", "category": "dairy"},
        {"id": "c", "name": "Spaghetti Pasta", "quantity": 500, "unit": "g", "category": "Pantry"}
    ]"#;

    #[test]
    fn test_load_and_build_report() -> Result<()> {
        let recipes_file = write_temp(RECIPES)?;
        let inventory_file = write_temp(INVENTORY)?;

        let recipes = load_recipes(recipes_file.path())?;
        let inventory = load_inventory(inventory_file.path())?;
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[1].id, "7");
        assert_eq!(inventory.len(), 3);

        let report = build_report(&recipes, &inventory, &PlannerConfig::default());

        assert_eq!(report.language, "en");
        assert_eq!(report.recipes[0].recipe_id, "omelette");
        assert!(report.recipes[0].availability.can_cook_now);

        let omelette = report.recipes[0]
            .nutrition
            .as_ref()
            .context("Omelette should have nutrition")?;
        assert_eq!(omelette.servings, 2);
        assert!(!omelette.servings_estimated);

        let pasta = &report.recipes[1];
        assert_eq!(pasta.title, "Tomato Pasta");
        assert_eq!(pasta.availability.availability_percentage, 33);
        assert_eq!(report.shopping_list.len(), 2);
        assert_eq!(report.shopping_list[0].name, "canned tomatoes");
        assert_eq!(report.shopping_list[0].unit, "can");

        Ok(())
    }

    #[test]
    fn test_report_serializes_camel_case() -> Result<()> {
        let recipes_file = write_temp(RECIPES)?;
        let recipes = load_recipes(recipes_file.path())?;

        let report = build_report(&recipes, &[], &PlannerConfig::default());
        let json = serde_json::to_string(&report)?;

        assert!(json.contains("\"shoppingList\""));
        assert!(json.contains("\"availabilityPercentage\""));
        assert!(json.contains("\"perServing\""));
        Ok(())
    }

    #[test]
    fn test_french_report_reasons() -> Result<()> {
        let recipes_file = write_temp(RECIPES)?;
        let recipes = load_recipes(recipes_file.path())?;
        let config = PlannerConfig {
            language: "fr".to_string(),
            ..PlannerConfig::default()
        };

        let report = build_report(&recipes, &[], &config);
        assert!(report
            .recipes
            .iter()
            .all(|r| r.availability.recommendation_reason.starts_with("Vous avez")));
        Ok(())
    }

    #[test]
    fn test_loosely_typed_servings_load() -> Result<()> {
        let file = write_temp(
            r#"[
                {"id": "a", "servings": 4.0, "ingredients": ["4 eggs"]},
                {"id": "b", "servings": "6", "ingredients": ["2 cups rice"]},
                {"id": "c", "servings": "several", "ingredients": ["1 onion"]}
            ]"#,
        )?;

        let recipes = load_recipes(file.path())?;
        let servings: Vec<Option<u32>> = recipes.iter().map(|r| r.servings).collect();
        assert_eq!(servings, vec![Some(4), Some(6), None]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_recipes(std::path::Path::new("/nonexistent/recipes.json"));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read"));
    }

    #[test]
    fn test_malformed_json_is_an_error() -> Result<()> {
        let file = write_temp("{ not json")?;
        let result = load_inventory(file.path());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to parse"));
        Ok(())
    }
}
