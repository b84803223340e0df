//! # Integration Tests
//!
//! End-to-end checks: loosely shaped recipe JSON through the ingredient
//! adapter, nutrition aggregation and inventory matching.

use mealwise::ingredient_model::{Ingredient, Recipe};
use mealwise::inventory_matcher::InventoryMatcher;
use mealwise::inventory_model::{InventoryCategory, InventoryItem};
use mealwise::nutrition_aggregator::{MacroTotals, NutritionAggregator};

#[test]
fn test_full_match_scenario() {
    let matcher = InventoryMatcher::new();
    let recipe = Recipe::new(
        "cake",
        "Cake",
        vec![Ingredient::new("egg"), Ingredient::new("flour")],
    );
    let inventory = vec![
        InventoryItem::new("1", "Eggs", 6.0, "pcs", InventoryCategory::Dairy),
        InventoryItem::new("2", "All-Purpose Flour", 1.0, "kg", InventoryCategory::Pantry),
    ];

    let availability = matcher.calculate_recipe_availability(&recipe, &inventory);

    assert_eq!(availability.availability_percentage, 100);
    assert!(availability.can_cook_now);
    assert_eq!(availability.available_ingredients, 2);
    assert!(availability.missing_ingredients.is_empty());
}

#[test]
fn test_partial_match_scenario() {
    let matcher = InventoryMatcher::new();
    let recipe = Recipe::new(
        "stew",
        "Stew",
        vec![Ingredient::new("chicken breast"), Ingredient::new("unicorn meat")],
    );
    let inventory = vec![InventoryItem::new(
        "1",
        "Chicken Breast",
        2.0,
        "pcs",
        InventoryCategory::Meat,
    )];

    let availability = matcher.calculate_recipe_availability(&recipe, &inventory);

    assert_eq!(availability.availability_percentage, 50);
    assert!(!availability.can_cook_now);
    assert_eq!(availability.missing_ingredients.len(), 1);
    assert_eq!(availability.missing_ingredients[0].name, "unicorn meat");
}

#[test]
fn test_nutrition_computation_scenario() {
    let aggregator = NutritionAggregator::new();
    let ingredients = vec![Ingredient::new("chicken breast").with_amount(200.0, "g")];

    let per_serving = aggregator.compute_from_ingredients(&ingredients, 1).unwrap();

    assert_eq!(per_serving.calories, 330);
    assert_eq!(per_serving.protein, 62.0);
}

#[test]
fn test_servings_estimation_scenario() {
    let aggregator = NutritionAggregator::new();
    let ingredients = vec![
        Ingredient::new("eggs").with_amount(4.0, ""),
        Ingredient::new("flour").with_amount(300.0, "g"),
        Ingredient::new("butter").with_amount(100.0, "g"),
    ];
    let totals = MacroTotals {
        calories: 2400.0,
        ..MacroTotals::default()
    };

    // Eggs suggest 2, calories suggest 4
    let servings = aggregator.estimate_servings_from_ingredients(&ingredients, Some(&totals));
    assert_eq!(servings, 4);
}

#[test]
fn test_availability_is_deterministic() {
    let matcher = InventoryMatcher::new();
    let recipe = Recipe::new(
        "salad",
        "Salad",
        vec![
            Ingredient::new("tomato").with_amount(2.0, ""),
            Ingredient::new("cheese").with_amount(50.0, "g"),
            Ingredient::new("croutons").with_amount(1.0, "cup"),
        ],
    );
    let inventory = vec![
        InventoryItem::new("1", "Roma Tomato", 4.0, "pcs", InventoryCategory::Produce),
        InventoryItem::new("2", "Feta", 200.0, "g", InventoryCategory::Dairy),
    ];

    let first = matcher.calculate_recipe_availability(&recipe, &inventory);
    let second = matcher.calculate_recipe_availability(&recipe, &inventory);
    assert_eq!(first, second);
    assert_eq!(first.availability_percentage, 67);
}

#[test]
fn test_loose_recipe_json() {
    // Sources mix bare strings, `quantity` vs `amount` and text-only amounts
    let json = r#"{
        "id": 42,
        "name": "Pancakes",
        "ingredients": [
            "1 1/2 cups all-purpose flour",
            {"name": "milk", "quantity": 300, "unit": "ml"},
            {"name": "eggs", "amount": "2"},
            {"original": "2 tbsp sugar"},
            {"name": "butter", "amount": 0, "unit": "g", "text": "30 g melted butter"}
        ]
    }"#;

    let recipe: Recipe = serde_json::from_str(json).unwrap();
    assert_eq!(recipe.id, "42");
    assert_eq!(recipe.title, "Pancakes");
    assert_eq!(recipe.ingredients.len(), 5);

    let flour = &recipe.ingredients[0];
    assert_eq!(flour.name, "all-purpose flour");
    assert_eq!(flour.amount, Some(1.5));
    assert_eq!(flour.unit.as_deref(), Some("cups"));

    assert_eq!(recipe.ingredients[1].amount, Some(300.0));
    assert_eq!(recipe.ingredients[2].amount, Some(2.0));

    let butter = recipe.ingredients[4].resolved_quantity();
    assert_eq!(butter.amount, 30.0);
    assert_eq!(butter.unit, "g");

    let nutrition = NutritionAggregator::new()
        .compute_for_external_recipe(&recipe)
        .unwrap();
    assert!(nutrition.totals.calories > 0);
    assert!((1..=12).contains(&nutrition.servings));
}
