//! # Nutrition Aggregator
//!
//! Sums per-100g nutrition facts over a recipe's ingredients, estimates a
//! servings count when the recipe does not declare one, and derives
//! per-serving macros.
//!
//! ## Serving estimation
//!
//! Recipe sources often omit the servings count, and dividing a batch recipe
//! by one produces useless per-serving numbers. Four independent heuristics
//! each propose a count:
//!
//! 1. eggs: two per serving, once there are at least two
//! 2. bread slices or muffins: two per serving, once there are at least two
//! 3. protein weight: 150g of meat, fish or egg per serving
//! 4. calorie density: 600 kcal per serving
//!
//! The largest proposal wins (earlier heuristics win ties), the fallback is
//! one, and the result is clamped to the configured range.
//!
//! ```rust
//! use mealwise::ingredient_model::Ingredient;
//! use mealwise::nutrition_aggregator::NutritionAggregator;
//!
//! let aggregator = NutritionAggregator::new();
//! let ingredients = vec![Ingredient::new("chicken breast").with_amount(200.0, "g")];
//!
//! let per_serving = aggregator.compute_from_ingredients(&ingredients, 1).unwrap();
//! assert_eq!(per_serving.calories, 330);
//! assert_eq!(per_serving.protein, 62.0);
//! ```

use crate::ingredient_model::{Ingredient, Recipe};
use crate::nutrition_facts::{lookup, NutritionFact};
use crate::planner_config::ServingEstimatorConfig;
use crate::unit_conversion::{
    canonical_unit, classify_unit, ingredient_grams, UnitKind, BREAD_SLICE_WEIGHT, EGG_WEIGHT,
};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

/// Ingredient keywords counted by the protein-weight heuristic
pub const PROTEIN_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "turkey", "lamb", "fish", "salmon", "tuna", "shrimp", "egg",
];

/// Names that contain a protein keyword without being one
const PROTEIN_EXCLUSIONS: &[&str] = &["stock", "broth"];

/// Whole-word match, allowing a plural "s" ("eggs" names "egg", "veggies" does not)
fn names_word(name: &str, keyword: &str) -> bool {
    name.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == keyword || word.strip_suffix('s') == Some(keyword))
}

/// Unrounded whole-recipe sums
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroTotals {
    /// Add `grams` of an ingredient with the given per-100g values
    pub fn add_scaled(&mut self, fact: &NutritionFact, grams: f64) {
        let scale = grams / 100.0;
        self.calories += fact.calories * scale;
        self.protein += fact.protein * scale;
        self.carbs += fact.carbs * scale;
        self.fats += fact.fats * scale;
    }

    /// Divide by a servings count, treating zero as one
    pub fn divided_by(&self, servings: u32) -> MacroTotals {
        let servings = servings.max(1) as f64;
        MacroTotals {
            calories: self.calories / servings,
            protein: self.protein / servings,
            carbs: self.carbs / servings,
            fats: self.fats / servings,
        }
    }

    /// Integer calories, macros to one decimal place
    pub fn rounded(&self) -> Macros {
        Macros {
            calories: self.calories.max(0.0).round() as u32,
            protein: round_to_tenth(self.protein),
            carbs: round_to_tenth(self.carbs),
            fats: round_to_tenth(self.fats),
        }
    }
}

/// Display-ready macros: whole calories, grams to one decimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Which heuristic produced a servings estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServingsBasis {
    Eggs,
    BreadSlices,
    ProteinWeight,
    CalorieDensity,
    Default,
}

/// Estimated servings and the heuristic behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServingsEstimate {
    pub servings: u32,
    pub basis: ServingsBasis,
}

/// Per-serving nutrition for a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeNutrition {
    pub recipe_id: String,
    pub servings: u32,
    /// True when `servings` came from the estimator
    pub servings_estimated: bool,
    /// Heuristic used, when estimated
    pub servings_basis: Option<ServingsBasis>,
    pub totals: Macros,
    pub per_serving: Macros,
}

/// Ingredient facts the estimators look at
struct EstimatorIngredient {
    name: String,
    amount: f64,
    unit: String,
    unit_kind: UnitKind,
    grams: f64,
}

impl EstimatorIngredient {
    fn from_ingredient(ingredient: &Ingredient) -> Self {
        let resolved = ingredient.resolved_quantity();
        Self {
            name: ingredient.name.to_lowercase(),
            amount: resolved.amount,
            unit: canonical_unit(&resolved.unit),
            unit_kind: classify_unit(&resolved.unit),
            grams: ingredient_grams(ingredient),
        }
    }

    /// Item count, derived from weight when the unit is a measure
    fn count(&self, item_weight: f64) -> f64 {
        match self.unit_kind {
            UnitKind::Weight | UnitKind::Volume => self.grams / item_weight,
            UnitKind::Count | UnitKind::Unknown => self.amount,
        }
    }
}

struct EstimatorInput<'a> {
    ingredients: &'a [EstimatorIngredient],
    total_calories: f64,
}

type Estimator = fn(&EstimatorInput, &ServingEstimatorConfig) -> Option<u32>;

/// Heuristics in tie-break order
const ESTIMATORS: &[(ServingsBasis, Estimator)] = &[
    (ServingsBasis::Eggs, estimate_from_eggs),
    (ServingsBasis::BreadSlices, estimate_from_bread),
    (ServingsBasis::ProteinWeight, estimate_from_protein),
    (ServingsBasis::CalorieDensity, estimate_from_calories),
];

fn positive_round(value: f64) -> Option<u32> {
    let rounded = value.round();
    (rounded >= 1.0).then_some(rounded as u32)
}

fn estimate_from_eggs(input: &EstimatorInput, config: &ServingEstimatorConfig) -> Option<u32> {
    let eggs: f64 = input
        .ingredients
        .iter()
        .filter(|i| {
            names_word(&i.name, "egg")
                || i.unit == "egg"
                || i.unit == "eggs"
        })
        .map(|i| i.count(EGG_WEIGHT))
        .sum();

    if eggs >= 2.0 {
        positive_round(eggs / config.eggs_per_serving)
    } else {
        None
    }
}

fn estimate_from_bread(input: &EstimatorInput, config: &ServingEstimatorConfig) -> Option<u32> {
    let slices: f64 = input
        .ingredients
        .iter()
        .filter(|i| {
            let named = (names_word(&i.name, "bread") || names_word(&i.name, "muffin"))
                && !i.name.contains("flour")
                && !i.name.contains("crumb");
            named || i.unit.contains("slice")
        })
        .map(|i| i.count(BREAD_SLICE_WEIGHT))
        .sum();

    if slices >= 2.0 {
        positive_round(slices / config.slices_per_serving)
    } else {
        None
    }
}

fn estimate_from_protein(input: &EstimatorInput, config: &ServingEstimatorConfig) -> Option<u32> {
    let protein_grams: f64 = input
        .ingredients
        .iter()
        .filter(|i| PROTEIN_KEYWORDS.iter().any(|k| names_word(&i.name, k)))
        .filter(|i| !PROTEIN_EXCLUSIONS.iter().any(|k| i.name.contains(k)))
        .map(|i| i.grams)
        .sum();

    positive_round(protein_grams / config.protein_grams_per_serving)
}

fn estimate_from_calories(input: &EstimatorInput, config: &ServingEstimatorConfig) -> Option<u32> {
    positive_round(input.total_calories / config.calories_per_serving)
}

/// Recipe-level nutrition calculator
pub struct NutritionAggregator {
    config: ServingEstimatorConfig,
}

impl NutritionAggregator {
    /// Create an aggregator with default serving heuristics
    pub fn new() -> Self {
        Self::with_config(ServingEstimatorConfig::default())
    }

    /// Create an aggregator with custom serving heuristics
    pub fn with_config(config: ServingEstimatorConfig) -> Self {
        Self { config }
    }

    /// Whole-recipe totals.
    ///
    /// Ingredients with no matching nutrition fact are skipped, so the result
    /// is a lower bound. Returns `None` only for an empty list.
    pub fn compute_totals_from_ingredients(&self, ingredients: &[Ingredient]) -> Option<MacroTotals> {
        if ingredients.is_empty() {
            return None;
        }

        let mut totals = MacroTotals::default();
        for ingredient in ingredients {
            let Some(fact) = lookup(&ingredient.name) else {
                debug!("No nutrition fact for '{}', skipping", ingredient.name);
                continue;
            };
            let grams = ingredient_grams(ingredient);
            trace!("'{}': {:.1}g", ingredient.name, grams);
            totals.add_scaled(&fact, grams);
        }

        Some(totals)
    }

    /// Estimate servings and report which heuristic decided.
    ///
    /// `totals` is computed from the ingredients when not supplied.
    pub fn estimate_servings(
        &self,
        ingredients: &[Ingredient],
        totals: Option<&MacroTotals>,
    ) -> ServingsEstimate {
        let total_calories = match totals {
            Some(totals) => totals.calories,
            None => self
                .compute_totals_from_ingredients(ingredients)
                .map(|t| t.calories)
                .unwrap_or(0.0),
        };

        let prepared: Vec<EstimatorIngredient> = ingredients
            .iter()
            .map(EstimatorIngredient::from_ingredient)
            .collect();
        let input = EstimatorInput {
            ingredients: &prepared,
            total_calories,
        };

        let best = ESTIMATORS
            .iter()
            .filter_map(|(basis, estimator)| {
                let candidate = estimator(&input, &self.config);
                trace!("Servings candidate {:?}: {:?}", basis, candidate);
                candidate.map(|servings| (*basis, servings))
            })
            .fold(None, |best: Option<(ServingsBasis, u32)>, candidate| match best {
                Some(current) if current.1 >= candidate.1 => Some(current),
                _ => Some(candidate),
            });

        let (basis, servings) = best.unwrap_or((ServingsBasis::Default, 1));
        let (min_servings, max_servings) = self.config.servings_range();
        let servings = servings.clamp(min_servings, max_servings);

        debug!("Estimated {} servings from {:?}", servings, basis);
        ServingsEstimate { servings, basis }
    }

    /// Estimated servings count, always within the configured range
    pub fn estimate_servings_from_ingredients(
        &self,
        ingredients: &[Ingredient],
        totals: Option<&MacroTotals>,
    ) -> u32 {
        self.estimate_servings(ingredients, totals).servings
    }

    /// Per-serving macros for a known servings count
    pub fn compute_from_ingredients(&self, ingredients: &[Ingredient], servings: u32) -> Option<Macros> {
        self.compute_totals_from_ingredients(ingredients)
            .map(|totals| totals.divided_by(servings).rounded())
    }

    /// Per-serving nutrition for an arbitrary imported recipe.
    ///
    /// Declared servings above one are trusted; otherwise the estimator runs.
    pub fn compute_for_external_recipe(&self, recipe: &Recipe) -> Option<RecipeNutrition> {
        let totals = self.compute_totals_from_ingredients(&recipe.ingredients)?;

        let (servings, basis) = match recipe.servings {
            Some(declared) if declared > 1 => (declared, None),
            _ => {
                let estimate = self.estimate_servings(&recipe.ingredients, Some(&totals));
                (estimate.servings, Some(estimate.basis))
            }
        };

        let per_serving = totals.divided_by(servings).rounded();
        info!(
            "Recipe '{}': {} servings ({}), {} kcal per serving",
            recipe.id,
            servings,
            if basis.is_some() { "estimated" } else { "declared" },
            per_serving.calories
        );

        Some(RecipeNutrition {
            recipe_id: recipe.id.clone(),
            servings,
            servings_estimated: basis.is_some(),
            servings_basis: basis,
            totals: totals.rounded(),
            per_serving,
        })
    }
}

impl Default for NutritionAggregator {
    fn default() -> Self {
        Self::new()
    }
}
