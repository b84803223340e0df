//! # Inventory Matcher Module
//!
//! Works out how much of a recipe the user's inventory already covers.
//! Matching is by name only: an ingredient found in the inventory counts as
//! fully available whatever quantity is recorded for it.
//!
//! ## Matching tiers
//!
//! 1. Exact match of normalized names
//! 2. Substring match in either direction
//! 3. Variation lookup through a [`SynonymResolver`] (by default
//!    [`VariationTable`], e.g. "chicken" finds "chicken thigh")
//!
//! ## Usage
//!
//! ```rust
//! use mealwise::ingredient_model::{Ingredient, Recipe};
//! use mealwise::inventory_matcher::InventoryMatcher;
//! use mealwise::inventory_model::{InventoryCategory, InventoryItem};
//!
//! let recipe = Recipe::new("1", "Omelette", vec![Ingredient::new("egg")]);
//! let inventory = vec![InventoryItem::new("a", "Eggs", 6.0, "pcs", InventoryCategory::Dairy)];
//!
//! let availability = InventoryMatcher::new().calculate_recipe_availability(&recipe, &inventory);
//! assert!(availability.can_cook_now);
//! ```

use crate::ingredient_model::Recipe;
use crate::inventory_model::InventoryItem;
use crate::localization::{t_args_lang, t_lang, DEFAULT_LANGUAGE};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Preparation words that do not change what the ingredient is
pub const MODIFIER_WORDS: &[&str] = &[
    "fresh", "dried", "chopped", "sliced", "diced", "minced", "ground",
];

/// Base terms and the specific inventory items they may refer to
pub const INGREDIENT_VARIATIONS: &[(&str, &[&str])] = &[
    (
        "chicken",
        &["chicken breast", "chicken thigh", "chicken leg", "chicken wing", "whole chicken"],
    ),
    (
        "tomato",
        &["cherry tomato", "roma tomato", "plum tomato", "tomatoes", "tinned tomatoes"],
    ),
    (
        "onion",
        &["red onion", "white onion", "yellow onion", "spring onion", "shallot"],
    ),
    ("garlic", &["garlic clove", "garlic bulb", "garlic cloves"]),
    (
        "cheese",
        &["cheddar", "mozzarella", "parmesan", "feta", "gouda"],
    ),
];

/// Availability at or above this percentage is "almost there"
pub const ALMOST_READY_PERCENTAGE: u32 = 75;

lazy_static! {
    static ref PUNCTUATION_REGEX: Regex =
        Regex::new(r"[^\w\s]").expect("Punctuation regex should be valid");
    static ref WHITESPACE_REGEX: Regex =
        Regex::new(r"\s+").expect("Whitespace regex should be valid");
}

/// Lowercase, strip punctuation and modifier words, collapse whitespace
pub fn normalize_ingredient_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let without_punctuation = PUNCTUATION_REGEX.replace_all(&lowered, "");
    let words: Vec<&str> = WHITESPACE_REGEX
        .split(without_punctuation.trim())
        .filter(|word| !word.is_empty() && !MODIFIER_WORDS.contains(word))
        .collect();
    words.join(" ")
}

/// Strategy for the last matching tier: which specific inventory names a
/// recipe ingredient may stand for
pub trait SynonymResolver {
    /// Candidate inventory names for a normalized recipe ingredient name
    fn variants(&self, normalized_name: &str) -> Vec<&str>;
}

/// Fixed base-term to variants table
#[derive(Debug, Clone, Copy)]
pub struct VariationTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl VariationTable {
    pub fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { entries }
    }
}

impl Default for VariationTable {
    fn default() -> Self {
        Self::new(INGREDIENT_VARIATIONS)
    }
}

impl SynonymResolver for VariationTable {
    fn variants(&self, normalized_name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(base, _)| normalized_name.contains(base))
            .flat_map(|(_, variants)| variants.iter().copied())
            .collect()
    }
}

/// Which tier produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Partial,
    Variation,
}

/// An inventory item matched to a recipe ingredient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventoryMatch<'a> {
    pub item: &'a InventoryItem,
    pub kind: MatchKind,
}

/// A recipe ingredient with no inventory match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingIngredient {
    pub name: String,
    pub required_quantity: f64,
    pub required_unit: String,
    pub available_quantity: f64,
    pub shortfall: f64,
}

/// How much of a recipe the inventory covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeAvailability {
    pub recipe_id: String,
    pub available_ingredients: usize,
    pub total_ingredients: usize,
    /// 0 to 100
    pub availability_percentage: u32,
    pub missing_ingredients: Vec<MissingIngredient>,
    /// True exactly when `availability_percentage == 100`
    pub can_cook_now: bool,
    pub recommendation_reason: String,
}

/// Recipe-to-inventory matcher
pub struct InventoryMatcher<R: SynonymResolver = VariationTable> {
    resolver: R,
    language: String,
}

impl InventoryMatcher<VariationTable> {
    /// Create a matcher with the default variation table and English reasons
    pub fn new() -> Self {
        Self::with_resolver(VariationTable::default())
    }
}

impl Default for InventoryMatcher<VariationTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SynonymResolver> InventoryMatcher<R> {
    /// Create a matcher with a custom synonym strategy
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the language for recommendation reasons
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Find the best inventory item for a recipe ingredient name
    pub fn find_inventory_match<'a>(
        &self,
        recipe_ingredient_name: &str,
        inventory: &'a [InventoryItem],
    ) -> Option<InventoryMatch<'a>> {
        let wanted = normalize_ingredient_name(recipe_ingredient_name);
        if wanted.is_empty() {
            return None;
        }

        let normalized: Vec<(String, &InventoryItem)> = inventory
            .iter()
            .map(|item| (normalize_ingredient_name(&item.name), item))
            .collect();

        if let Some((_, item)) = normalized.iter().find(|(name, _)| *name == wanted) {
            return Some(InventoryMatch {
                item: *item,
                kind: MatchKind::Exact,
            });
        }

        if let Some((_, item)) = normalized.iter().find(|(name, _)| {
            !name.is_empty() && (name.contains(wanted.as_str()) || wanted.contains(name.as_str()))
        }) {
            return Some(InventoryMatch {
                item: *item,
                kind: MatchKind::Partial,
            });
        }

        for variant in self.resolver.variants(&wanted) {
            let variant = normalize_ingredient_name(variant);
            if let Some((_, item)) = normalized.iter().find(|(name, _)| name.contains(&variant)) {
                trace!("'{}' matched '{}' through variant '{}'", wanted, item.name, variant);
                return Some(InventoryMatch {
                    item: *item,
                    kind: MatchKind::Variation,
                });
            }
        }

        None
    }

    /// Score one recipe against the inventory
    pub fn calculate_recipe_availability(
        &self,
        recipe: &Recipe,
        inventory: &[InventoryItem],
    ) -> RecipeAvailability {
        let total = recipe.ingredients.len();
        if total == 0 {
            return RecipeAvailability {
                recipe_id: recipe.id.clone(),
                available_ingredients: 0,
                total_ingredients: 0,
                availability_percentage: 0,
                missing_ingredients: Vec::new(),
                can_cook_now: false,
                recommendation_reason: t_lang("availability-none", Some(&self.language)),
            };
        }

        let mut available = 0;
        let mut missing_ingredients = Vec::new();

        for ingredient in &recipe.ingredients {
            if self.find_inventory_match(&ingredient.name, inventory).is_some() {
                available += 1;
                continue;
            }

            let quantity = ingredient.resolved_quantity();
            missing_ingredients.push(MissingIngredient {
                name: ingredient.name.clone(),
                required_quantity: quantity.amount,
                required_unit: quantity.unit.clone(),
                available_quantity: 0.0,
                shortfall: quantity.amount,
            });
        }

        let availability_percentage = ((available as f64 * 100.0) / total as f64).round() as u32;
        let recommendation_reason =
            self.recommendation_reason(availability_percentage, available, total);

        debug!(
            "Recipe {}: {}/{} ingredients available ({}%)",
            recipe.id, available, total, availability_percentage
        );

        RecipeAvailability {
            recipe_id: recipe.id.clone(),
            available_ingredients: available,
            total_ingredients: total,
            availability_percentage,
            missing_ingredients,
            can_cook_now: availability_percentage == 100,
            recommendation_reason,
        }
    }

    /// Score every recipe; ready-to-cook first, then by availability, ties in
    /// input order
    pub fn get_recipes_with_availability(
        &self,
        recipes: &[Recipe],
        inventory: &[InventoryItem],
    ) -> Vec<RecipeAvailability> {
        let mut results: Vec<RecipeAvailability> = recipes
            .iter()
            .map(|recipe| self.calculate_recipe_availability(recipe, inventory))
            .collect();

        results.sort_by(availability_order);
        results
    }

    fn recommendation_reason(&self, percentage: u32, available: usize, total: usize) -> String {
        let language = Some(self.language.as_str());
        let missing = total - available;

        // A rounded 100% can still leave one of many ingredients missing
        if missing == 0 {
            t_args_lang("availability-ready", &[("total", &total.to_string())], language)
        } else if percentage >= ALMOST_READY_PERCENTAGE {
            let key = if missing == 1 {
                "availability-almost-one"
            } else {
                "availability-almost"
            };
            t_args_lang(key, &[("missing", &missing.to_string())], language)
        } else {
            t_args_lang(
                "availability-shopping",
                &[
                    ("available", &available.to_string()),
                    ("total", &total.to_string()),
                ],
                language,
            )
        }
    }
}

/// Ranking order for availability results: ready-to-cook first, then by
/// availability percentage, highest first
pub fn availability_order(a: &RecipeAvailability, b: &RecipeAvailability) -> Ordering {
    b.can_cook_now
        .cmp(&a.can_cook_now)
        .then(b.availability_percentage.cmp(&a.availability_percentage))
}
