//! # Nutrition Facts Table
//!
//! Static per-100g macro values with a synonym map for name normalisation.
//!
//! Lookups go through [`match_fact_key`]: the name is lowercased, trimmed and
//! passed through the alias map, then matched exactly against the table. When
//! there is no exact match, the first table key contained in the name wins,
//! which is why more specific keys ("peanut butter") are listed before the
//! keys they contain ("butter").
//!
//! A `None` from the lookup means "leave this ingredient out of the totals".

use lazy_static::lazy_static;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Macro values per 100g of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionFact {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

const fn per_100g(calories: f64, protein: f64, carbs: f64, fats: f64) -> NutritionFact {
    NutritionFact {
        calories,
        protein,
        carbs,
        fats,
    }
}

/// Density of water in g/ml, used when an ingredient has no entry
pub const DEFAULT_DENSITY: f64 = 1.0;

/// Nutrition facts in match order
pub const NUTRITION_FACTS: &[(&str, NutritionFact)] = &[
    // Names containing a shorter key listed further down
    ("stock", per_100g(7.0, 1.0, 0.5, 0.2)),
    ("broth", per_100g(7.0, 1.0, 0.5, 0.2)),
    ("buttermilk", per_100g(40.0, 3.3, 4.8, 0.9)),
    ("butternut squash", per_100g(45.0, 1.0, 11.7, 0.1)),
    ("veggie", per_100g(65.0, 2.6, 13.0, 0.3)),
    ("vegetable oil", per_100g(884.0, 0.0, 0.0, 100.0)),
    // Proteins
    ("chicken breast", per_100g(165.0, 31.0, 0.0, 3.6)),
    ("chicken thigh", per_100g(209.0, 26.0, 0.0, 10.9)),
    ("chicken", per_100g(239.0, 27.0, 0.0, 14.0)),
    ("ground beef", per_100g(254.0, 17.0, 0.0, 20.0)),
    ("beef", per_100g(250.0, 26.0, 0.0, 15.0)),
    ("bacon", per_100g(541.0, 37.0, 1.4, 42.0)),
    ("pork", per_100g(242.0, 27.0, 0.0, 14.0)),
    ("turkey", per_100g(135.0, 30.0, 0.0, 1.0)),
    ("lamb", per_100g(294.0, 25.0, 0.0, 21.0)),
    ("salmon", per_100g(208.0, 20.0, 0.0, 13.0)),
    ("tuna", per_100g(132.0, 28.0, 0.0, 1.0)),
    ("shrimp", per_100g(99.0, 24.0, 0.2, 0.3)),
    ("cod", per_100g(82.0, 18.0, 0.0, 0.7)),
    ("fish", per_100g(105.0, 20.0, 0.0, 2.5)),
    ("tofu", per_100g(76.0, 8.0, 1.9, 4.8)),
    ("eggplant", per_100g(25.0, 1.0, 6.0, 0.2)),
    ("egg", per_100g(143.0, 12.6, 0.7, 9.5)),
    // Dairy
    ("cheddar cheese", per_100g(403.0, 25.0, 1.3, 33.0)),
    ("cream cheese", per_100g(342.0, 6.0, 4.1, 34.0)),
    ("mozzarella", per_100g(280.0, 28.0, 3.1, 17.0)),
    ("parmesan", per_100g(431.0, 38.0, 4.1, 29.0)),
    ("feta", per_100g(264.0, 14.0, 4.1, 21.0)),
    ("cheese", per_100g(402.0, 25.0, 1.3, 33.0)),
    ("greek yogurt", per_100g(59.0, 10.0, 3.6, 0.4)),
    ("yogurt", per_100g(61.0, 3.5, 4.7, 3.3)),
    ("peanut butter", per_100g(588.0, 25.0, 20.0, 50.0)),
    ("butter", per_100g(717.0, 0.9, 0.1, 81.0)),
    ("cream", per_100g(340.0, 2.1, 2.8, 36.0)),
    ("coconut milk", per_100g(230.0, 2.3, 6.0, 24.0)),
    ("almond milk", per_100g(17.0, 0.6, 0.6, 1.1)),
    ("milk", per_100g(42.0, 3.4, 5.0, 1.0)),
    // Grains and bakery
    ("bread", per_100g(265.0, 9.0, 49.0, 3.2)),
    ("tortilla", per_100g(310.0, 8.0, 52.0, 8.0)),
    ("flour", per_100g(364.0, 10.0, 76.0, 1.0)),
    ("oats", per_100g(389.0, 16.9, 66.0, 6.9)),
    ("quinoa", per_100g(120.0, 4.4, 21.0, 1.9)),
    ("rice", per_100g(130.0, 2.7, 28.0, 0.3)),
    ("pasta", per_100g(131.0, 5.0, 25.0, 1.1)),
    ("noodles", per_100g(138.0, 4.5, 25.0, 2.0)),
    // Produce
    ("sweet potato", per_100g(86.0, 1.6, 20.0, 0.1)),
    ("potato", per_100g(77.0, 2.0, 17.0, 0.1)),
    ("chopped tomatoes", per_100g(21.0, 1.0, 3.5, 0.1)),
    ("tomato", per_100g(18.0, 0.9, 3.9, 0.2)),
    ("onion", per_100g(40.0, 1.1, 9.3, 0.1)),
    ("garlic", per_100g(149.0, 6.4, 33.0, 0.5)),
    ("carrot", per_100g(41.0, 0.9, 10.0, 0.2)),
    ("spinach", per_100g(23.0, 2.9, 3.6, 0.4)),
    ("broccoli", per_100g(34.0, 2.8, 7.0, 0.4)),
    ("bell pepper", per_100g(31.0, 1.0, 6.0, 0.3)),
    ("mushroom", per_100g(22.0, 3.1, 3.3, 0.3)),
    ("zucchini", per_100g(17.0, 1.2, 3.1, 0.3)),
    ("squash", per_100g(45.0, 1.0, 11.7, 0.1)),
    ("vegetable", per_100g(65.0, 2.6, 13.0, 0.3)),
    ("avocado", per_100g(160.0, 2.0, 8.5, 14.7)),
    ("banana", per_100g(89.0, 1.1, 23.0, 0.3)),
    ("pineapple", per_100g(50.0, 0.5, 13.0, 0.1)),
    ("apple", per_100g(52.0, 0.3, 14.0, 0.2)),
    ("lemon", per_100g(29.0, 1.1, 9.0, 0.3)),
    ("berries", per_100g(57.0, 0.7, 14.0, 0.3)),
    // Legumes
    ("black beans", per_100g(132.0, 8.9, 24.0, 0.5)),
    ("kidney beans", per_100g(127.0, 8.7, 22.8, 0.5)),
    ("chickpeas", per_100g(164.0, 8.9, 27.0, 2.6)),
    ("lentils", per_100g(116.0, 9.0, 20.0, 0.4)),
    // Fats, nuts and sweeteners
    ("olive oil", per_100g(884.0, 0.0, 0.0, 100.0)),
    ("oil", per_100g(884.0, 0.0, 0.0, 100.0)),
    ("almond", per_100g(579.0, 21.0, 22.0, 50.0)),
    ("walnut", per_100g(654.0, 15.0, 14.0, 65.0)),
    ("maple syrup", per_100g(260.0, 0.0, 67.0, 0.1)),
    ("honey", per_100g(304.0, 0.3, 82.0, 0.0)),
    ("sugar", per_100g(387.0, 0.0, 100.0, 0.0)),
    ("salt", per_100g(0.0, 0.0, 0.0, 0.0)),
    ("water", per_100g(0.0, 0.0, 0.0, 0.0)),
];

/// Synonyms resolved to canonical table keys before lookup
pub const ALIASES: &[(&str, &str)] = &[
    ("tomatoes", "tomato"),
    ("canned tomatoes", "chopped tomatoes"),
    ("tinned tomatoes", "chopped tomatoes"),
    ("diced tomatoes", "chopped tomatoes"),
    ("cheddar", "cheddar cheese"),
    ("parmesan cheese", "parmesan"),
    ("mozzarella cheese", "mozzarella"),
    ("eggs", "egg"),
    ("large egg", "egg"),
    ("large eggs", "egg"),
    ("egg noodles", "noodles"),
    ("onions", "onion"),
    ("spring onions", "onion"),
    ("scallions", "onion"),
    ("potatoes", "potato"),
    ("sweet potatoes", "sweet potato"),
    ("carrots", "carrot"),
    ("chicken breasts", "chicken breast"),
    ("chicken thighs", "chicken thigh"),
    ("chicken broth", "broth"),
    ("minced beef", "ground beef"),
    ("beef mince", "ground beef"),
    ("prawns", "shrimp"),
    ("plain flour", "flour"),
    ("all-purpose flour", "flour"),
    ("all purpose flour", "flour"),
    ("self-raising flour", "flour"),
    ("bread flour", "flour"),
    ("strong flour", "flour"),
    ("caster sugar", "sugar"),
    ("brown sugar", "sugar"),
    ("garlic cloves", "garlic"),
    ("bananas", "banana"),
    ("apples", "apple"),
    ("mushrooms", "mushroom"),
    ("bell peppers", "bell pepper"),
    ("red pepper", "bell pepper"),
    ("chickpea", "chickpeas"),
    ("lentil", "lentils"),
    ("yoghurt", "yogurt"),
    ("greek yoghurt", "greek yogurt"),
    ("extra virgin olive oil", "olive oil"),
    ("canola oil", "vegetable oil"),
    ("mixed veg", "vegetable"),
    ("rolled oats", "oats"),
    ("whole milk", "milk"),
    ("skim milk", "milk"),
];

/// Densities in g/ml, keyed by nutrition fact key
pub const DENSITIES: &[(&str, f64)] = &[
    ("flour", 0.53),
    ("sugar", 0.85),
    ("rice", 0.85),
    ("oats", 0.41),
    ("quinoa", 0.72),
    ("milk", 1.03),
    ("almond milk", 1.01),
    ("coconut milk", 0.97),
    ("cream", 1.01),
    ("yogurt", 1.03),
    ("greek yogurt", 1.05),
    ("butter", 0.91),
    ("olive oil", 0.92),
    ("oil", 0.92),
    ("vegetable oil", 0.92),
    ("buttermilk", 1.03),
    ("honey", 1.42),
    ("maple syrup", 1.32),
    ("peanut butter", 1.08),
    ("salt", 1.2),
    ("cheddar cheese", 0.45),
    ("cheese", 0.45),
    ("parmesan", 0.4),
    ("mozzarella", 0.45),
    ("spinach", 0.13),
    ("berries", 0.6),
    ("lentils", 0.8),
    ("black beans", 0.75),
    ("chickpeas", 0.68),
    ("almond", 0.6),
    ("walnut", 0.5),
    ("onion", 0.6),
    ("carrot", 0.55),
    ("broccoli", 0.37),
    ("mushroom", 0.3),
    ("chicken breast", 0.58),
    ("ground beef", 0.54),
];

lazy_static! {
    static ref FACT_INDEX: HashMap<&'static str, NutritionFact> =
        NUTRITION_FACTS.iter().copied().collect();
    static ref ALIAS_INDEX: HashMap<&'static str, &'static str> =
        ALIASES.iter().copied().collect();
    static ref DENSITY_INDEX: HashMap<&'static str, f64> = DENSITIES.iter().copied().collect();
}

/// Lowercase, trim and substitute through the alias map
pub fn resolve_alias(name: &str) -> String {
    let name = name.trim().to_lowercase();
    match ALIAS_INDEX.get(name.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => name,
    }
}

/// Find the nutrition fact key for an ingredient name.
///
/// Exact match after alias resolution first, then the first table key that is
/// a substring of the resolved name.
pub fn match_fact_key(name: &str) -> Option<&'static str> {
    let resolved = resolve_alias(name);
    if resolved.is_empty() {
        return None;
    }

    if let Some((key, _)) = FACT_INDEX.get_key_value(resolved.as_str()) {
        return Some(*key);
    }

    let key = NUTRITION_FACTS
        .iter()
        .map(|(key, _)| *key)
        .find(|key| resolved.contains(key));

    trace!("Fact key for '{}' (resolved '{}'): {:?}", name, resolved, key);
    key
}

/// Per-100g values for a table key
pub fn fact(key: &str) -> Option<NutritionFact> {
    FACT_INDEX.get(key).copied()
}

/// Per-100g values for a free-text ingredient name
pub fn lookup(name: &str) -> Option<NutritionFact> {
    match_fact_key(name).and_then(fact)
}

/// Density in g/ml for a table key, water when unknown
pub fn density_for(key: Option<&str>) -> f64 {
    key.and_then(|key| DENSITY_INDEX.get(key).copied())
        .unwrap_or(DEFAULT_DENSITY)
}
