//! # Mealwise
//!
//! Nutrition and pantry logic for meal planning: parses free-text ingredient
//! quantities, converts them to grams, totals recipe nutrition from a static
//! facts table, matches recipes against the user's inventory and suggests
//! portion-scaled meals for the remaining daily targets.

pub mod ingredient_model;
pub mod inventory_matcher;
pub mod inventory_model;
pub mod localization;
pub mod meal_recommendation;
pub mod measurement_patterns;
pub mod nutrition_aggregator;
pub mod nutrition_facts;
pub mod planner_config;
pub mod planner_errors;
pub mod quantity_parser;
pub mod report;
pub mod shopping_list;
pub mod unit_conversion;
