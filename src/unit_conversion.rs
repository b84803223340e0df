//! # Unit Conversion Module
//!
//! Converts quantity + unit text into grams, the common base for nutrition
//! aggregation.
//!
//! ## Dispatch
//!
//! - **Weight** units (g, kg, lb, oz, ...) use a fixed factor table.
//! - **Volume** units (ml, l, cup, tbsp, tsp, fl oz, ...) convert to millilitres
//!   and then to grams through the ingredient's density (water when unknown).
//! - **Count** units (piece, clove, slice, egg, can, jar, ...) and absent units
//!   on discrete items use typical per-item weights. Container words fall back
//!   to category defaults when no container weight is listed.
//!
//! Nothing here fails: unrecognised input contributes zero grams.

use crate::ingredient_model::{Ingredient, AMOUNT_EPSILON};
use crate::nutrition_facts::{density_for, match_fact_key};
use crate::quantity_parser::parse_quantity_unit;
use lazy_static::lazy_static;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weight units to grams
pub const WEIGHT_UNITS: &[(&str, f64)] = &[
    ("g", 1.0),
    ("gr", 1.0),
    ("gram", 1.0),
    ("grams", 1.0),
    ("gramme", 1.0),
    ("grammes", 1.0),
    ("mg", 0.001),
    ("kg", 1000.0),
    ("kgs", 1000.0),
    ("kilo", 1000.0),
    ("kilos", 1000.0),
    ("kilogram", 1000.0),
    ("kilograms", 1000.0),
    ("lb", 453.592),
    ("lbs", 453.592),
    ("pound", 453.592),
    ("pounds", 453.592),
    ("oz", 28.3495),
    ("ounce", 28.3495),
    ("ounces", 28.3495),
];

/// Volume units to millilitres
pub const VOLUME_UNITS: &[(&str, f64)] = &[
    ("ml", 1.0),
    ("millilitre", 1.0),
    ("millilitres", 1.0),
    ("milliliter", 1.0),
    ("milliliters", 1.0),
    ("cl", 10.0),
    ("dl", 100.0),
    ("l", 1000.0),
    ("litre", 1000.0),
    ("litres", 1000.0),
    ("liter", 1000.0),
    ("liters", 1000.0),
    ("cup", 240.0),
    ("cups", 240.0),
    ("tbsp", 15.0),
    ("tbs", 15.0),
    ("tablespoon", 15.0),
    ("tablespoons", 15.0),
    ("tsp", 5.0),
    ("teaspoon", 5.0),
    ("teaspoons", 5.0),
    ("fl oz", 29.5735),
    ("floz", 29.5735),
    ("fluid ounce", 29.5735),
    ("fluid ounces", 29.5735),
    ("pint", 473.176),
    ("pints", 473.176),
];

/// Units that count discrete items
pub const COUNT_UNITS: &[&str] = &[
    "pc", "pcs", "piece", "pieces", "item", "items", "whole", "clove", "cloves", "slice", "slices",
    "egg", "eggs", "can", "cans", "tin", "tins", "jar", "jars", "carton", "cartons", "packet",
    "packets", "pack", "packs", "pouch", "pouches",
];

/// Typical weight in grams of one item, matched by keyword in order
pub const COUNT_WEIGHTS: &[(&str, f64)] = &[
    ("eggplant", 300.0),
    ("egg", 50.0),
    ("garlic", 3.0),
    ("shallot", 30.0),
    ("onion", 110.0),
    ("sweet potato", 130.0),
    ("potato", 170.0),
    ("tomato", 120.0),
    ("carrot", 60.0),
    ("pineapple", 900.0),
    ("apple", 180.0),
    ("banana", 120.0),
    ("orange", 130.0),
    ("avocado", 150.0),
    ("lemon", 60.0),
    ("lime", 45.0),
    ("bell pepper", 120.0),
    ("zucchini", 200.0),
    ("cucumber", 300.0),
    ("mushroom", 18.0),
    ("chicken breast", 170.0),
    ("chicken thigh", 110.0),
    ("salmon", 150.0),
    ("tortilla", 45.0),
    ("bagel", 100.0),
    ("muffin", 60.0),
    ("bread", 30.0),
];

/// Known container weights in grams, matched by keyword in order
pub const CONTAINER_WEIGHTS: &[(&str, f64)] = &[
    ("coconut milk", 400.0),
    ("tuna", 145.0),
    ("sweetcorn", 198.0),
    ("chickpea", 240.0),
    ("lentil", 240.0),
];

/// Grams per garlic clove
pub const CLOVE_WEIGHT: f64 = 3.0;
/// Grams per bread slice
pub const BREAD_SLICE_WEIGHT: f64 = 30.0;
/// Grams per cheese slice
pub const CHEESE_SLICE_WEIGHT: f64 = 20.0;
/// Grams per bacon rasher
pub const BACON_SLICE_WEIGHT: f64 = 12.0;
/// Grams per egg
pub const EGG_WEIGHT: f64 = 50.0;

/// Drained beans per can
pub const BEAN_CONTAINER_WEIGHT: f64 = 240.0;
/// Tomatoes per can
pub const TOMATO_CONTAINER_WEIGHT: f64 = 400.0;
/// Grain, rice or pasta per packet
pub const GRAIN_CONTAINER_WEIGHT: f64 = 250.0;
/// Vegetables per can or bag
pub const VEG_CONTAINER_WEIGHT: f64 = 300.0;
/// Generic can or tin
pub const CAN_WEIGHT: f64 = 300.0;
/// Generic jar
pub const JAR_WEIGHT: f64 = 350.0;
/// Generic packet, pack, pouch or carton
pub const PACKET_WEIGHT: f64 = 200.0;

lazy_static! {
    static ref WEIGHT_INDEX: HashMap<&'static str, f64> = WEIGHT_UNITS.iter().copied().collect();
    static ref VOLUME_INDEX: HashMap<&'static str, f64> = VOLUME_UNITS.iter().copied().collect();
}

/// Broad category of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    Weight,
    Volume,
    Count,
    Unknown,
}

/// Lowercase, trim and drop a trailing period ("Tbsp." -> "tbsp")
fn clean_unit(unit: &str) -> String {
    unit.trim().to_lowercase().trim_end_matches('.').trim().to_string()
}

fn kind_of(unit: &str) -> UnitKind {
    if WEIGHT_INDEX.contains_key(unit) {
        UnitKind::Weight
    } else if VOLUME_INDEX.contains_key(unit) {
        UnitKind::Volume
    } else if COUNT_UNITS.contains(&unit) {
        UnitKind::Count
    } else {
        UnitKind::Unknown
    }
}

/// Reduce free unit text to a known unit where possible.
///
/// Tries the whole text, then its first two words ("fl oz"), then its first
/// word ("cups flour" -> "cups"). Returns the cleaned text when nothing matches.
pub fn canonical_unit(unit: &str) -> String {
    let cleaned = clean_unit(unit);
    if kind_of(&cleaned) != UnitKind::Unknown {
        return cleaned;
    }

    let words: Vec<String> = cleaned
        .split_whitespace()
        .map(|w| w.trim_end_matches('.').to_string())
        .collect();

    if words.len() >= 2 {
        let two = format!("{} {}", words[0], words[1]);
        if kind_of(&two) != UnitKind::Unknown {
            return two;
        }
    }

    if let Some(first) = words.first() {
        if kind_of(first) != UnitKind::Unknown {
            return first.clone();
        }
    }

    cleaned
}

/// Classify free unit text
pub fn classify_unit(unit: &str) -> UnitKind {
    kind_of(&canonical_unit(unit))
}

/// Split a parsed remainder such as "cups flour" into ("cups", "flour").
///
/// When the first word is not a unit, the whole remainder is the name. A
/// count word with nothing after it ("eggs") is treated as the name.
pub fn split_unit_and_name(rest: &str) -> (String, String) {
    let rest = rest.trim();
    let words: Vec<&str> = rest.split_whitespace().collect();
    if words.is_empty() {
        return (String::new(), String::new());
    }

    let candidates = [
        (words.len() >= 2).then(|| (format!("{} {}", words[0], words[1]), 2)),
        Some((words[0].to_string(), 1)),
    ];

    for (candidate, used) in candidates.into_iter().flatten() {
        let unit = clean_unit(&candidate);
        let kind = kind_of(&unit);
        if kind == UnitKind::Unknown {
            continue;
        }

        let name = strip_leading_article(&words[used..].join(" "));
        if name.is_empty() && kind == UnitKind::Count {
            break;
        }
        return (candidate, name);
    }

    (String::new(), rest.to_string())
}

fn strip_leading_article(name: &str) -> String {
    let lower = name.to_lowercase();
    for prefix in ["of ", "the ", "a ", "an "] {
        if lower.starts_with(prefix) {
            return name.get(prefix.len()..).unwrap_or(name).trim_start().to_string();
        }
    }
    name.trim().to_string()
}

/// Convert a quantity to grams.
///
/// When `amount` is absent or near zero and `original_text` is non-empty, the
/// original is re-parsed first. Unknown input yields zero.
///
/// ```rust
/// use mealwise::unit_conversion::to_grams;
///
/// assert_eq!(to_grams(2.0, "kg", "", ""), 2000.0);
/// assert_eq!(to_grams(3.0, "", "eggs", ""), 150.0);
/// assert_eq!(to_grams(0.0, "", "flour", "1 cup flour"), 240.0 * 0.53);
/// ```
pub fn to_grams(amount: f64, unit: &str, ingredient_name: &str, original_text: &str) -> f64 {
    let mut amount = amount;
    let mut unit = unit.to_string();

    if amount.abs() < AMOUNT_EPSILON && !original_text.trim().is_empty() {
        let parsed = parse_quantity_unit(original_text);
        amount = parsed.amount;
        if unit.trim().is_empty() {
            unit = parsed.unit;
        }
    }

    if amount <= AMOUNT_EPSILON {
        return 0.0;
    }

    let canonical = canonical_unit(&unit);
    let name = ingredient_name.trim().to_lowercase();

    let grams = match kind_of(&canonical) {
        UnitKind::Weight => amount * WEIGHT_INDEX[canonical.as_str()],
        UnitKind::Volume => {
            let ml = amount * VOLUME_INDEX[canonical.as_str()];
            ml * density_for(match_fact_key(&name))
        }
        UnitKind::Count => count_weight(&canonical, &name)
            .map(|each| amount * each)
            .unwrap_or(0.0),
        UnitKind::Unknown if canonical.is_empty() => typical_item_weight(&name)
            .map(|each| amount * each)
            .unwrap_or(0.0),
        // "3 large eggs" re-parsed leaves "large eggs" as the unit text
        UnitKind::Unknown => typical_item_weight(&canonical)
            .map(|each| amount * each)
            .unwrap_or(0.0),
    };

    if grams == 0.0 {
        debug!(
            "No gram conversion for {} '{}' of '{}'",
            amount, unit, ingredient_name
        );
    } else {
        trace!(
            "{} '{}' of '{}' -> {:.1}g",
            amount, unit, ingredient_name, grams
        );
    }
    grams
}

/// Grams for a recipe ingredient, using its resolved quantity
pub fn ingredient_grams(ingredient: &Ingredient) -> f64 {
    let resolved = ingredient.resolved_quantity();
    to_grams(resolved.amount, &resolved.unit, &ingredient.name, "")
}

/// Weight of one unit of a count measure for the named ingredient
fn count_weight(unit: &str, name: &str) -> Option<f64> {
    match unit {
        "clove" | "cloves" => Some(CLOVE_WEIGHT),
        "egg" | "eggs" => Some(EGG_WEIGHT),
        "slice" | "slices" => Some(if name.contains("cheese") {
            CHEESE_SLICE_WEIGHT
        } else if name.contains("bacon") {
            BACON_SLICE_WEIGHT
        } else {
            BREAD_SLICE_WEIGHT
        }),
        "can" | "cans" | "tin" | "tins" => Some(container_weight(name, CAN_WEIGHT)),
        "jar" | "jars" => Some(container_weight(name, JAR_WEIGHT)),
        "carton" | "cartons" | "packet" | "packets" | "pack" | "packs" | "pouch" | "pouches" => {
            Some(container_weight(name, PACKET_WEIGHT))
        }
        _ => typical_item_weight(name),
    }
}

fn container_weight(name: &str, generic: f64) -> f64 {
    if let Some((_, weight)) = CONTAINER_WEIGHTS.iter().find(|(key, _)| name.contains(key)) {
        return *weight;
    }

    if name.contains("bean") {
        BEAN_CONTAINER_WEIGHT
    } else if name.contains("tomato") {
        TOMATO_CONTAINER_WEIGHT
    } else if name.contains("grain") || name.contains("rice") || name.contains("pasta") {
        GRAIN_CONTAINER_WEIGHT
    } else if name.contains("veg") {
        VEG_CONTAINER_WEIGHT
    } else {
        generic
    }
}

/// Typical single-item weight for a discrete ingredient, if listed
pub fn typical_item_weight(name: &str) -> Option<f64> {
    let name = name.to_lowercase();
    COUNT_WEIGHTS
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, weight)| *weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_units() {
        for (unit, factor) in WEIGHT_UNITS {
            assert_eq!(to_grams(1.0, unit, "", ""), *factor, "unit {}", unit);
        }
        assert_eq!(to_grams(2.0, " KG ", "", ""), 2000.0);
    }

    #[test]
    fn test_volume_uses_density() {
        assert_eq!(to_grams(1.0, "cup", "flour", ""), 240.0 * 0.53);
        assert_eq!(to_grams(2.0, "tbsp", "olive oil", ""), 30.0 * 0.92);
        assert_eq!(to_grams(100.0, "ml", "unknown liquid", ""), 100.0);
        assert_eq!(to_grams(1.0, "fl oz", "water", ""), 29.5735);
    }

    #[test]
    fn test_count_units() {
        assert_eq!(to_grams(2.0, "cloves", "garlic", ""), 6.0);
        assert_eq!(to_grams(2.0, "slices", "bread", ""), 60.0);
        assert_eq!(to_grams(1.0, "slice", "cheddar cheese", ""), 20.0);
        assert_eq!(to_grams(1.0, "pcs", "onion", ""), 110.0);
        assert_eq!(to_grams(3.0, "", "eggs", ""), 150.0);
    }

    #[test]
    fn test_container_defaults() {
        assert_eq!(to_grams(1.0, "can", "black beans", ""), BEAN_CONTAINER_WEIGHT);
        assert_eq!(to_grams(1.0, "tin", "chopped tomatoes", ""), TOMATO_CONTAINER_WEIGHT);
        assert_eq!(to_grams(1.0, "packet", "basmati rice", ""), GRAIN_CONTAINER_WEIGHT);
        assert_eq!(to_grams(1.0, "pouch", "mixed veg", ""), VEG_CONTAINER_WEIGHT);
        assert_eq!(to_grams(1.0, "can", "coconut milk", ""), 400.0);
        assert_eq!(to_grams(1.0, "can", "soup", ""), CAN_WEIGHT);
        assert_eq!(to_grams(1.0, "jar", "pesto", ""), JAR_WEIGHT);
        assert_eq!(to_grams(1.0, "packet", "crackers", ""), PACKET_WEIGHT);
    }

    #[test]
    fn test_reparse_original() {
        assert_eq!(to_grams(0.0, "", "flour", "2 cups flour"), 480.0 * 0.53);
        assert_eq!(to_grams(0.0, "", "eggs", "3 large eggs"), 150.0);
        assert_eq!(to_grams(0.0, "g", "butter", "50"), 50.0);
    }

    #[test]
    fn test_unknown_degrades_to_zero() {
        assert_eq!(to_grams(2.0, "handfuls", "spinach", ""), 0.0);
        assert_eq!(to_grams(1.0, "", "salt", ""), 0.0);
        assert_eq!(to_grams(0.0, "", "salt", ""), 0.0);
        assert_eq!(to_grams(0.0, "", "salt", "to taste"), 0.0);
        assert_eq!(to_grams(-1.0, "g", "salt", ""), 0.0);
    }

    #[test]
    fn test_canonical_unit() {
        assert_eq!(canonical_unit("Tbsp."), "tbsp");
        assert_eq!(canonical_unit("cups flour"), "cups");
        assert_eq!(canonical_unit("fl oz milk"), "fl oz");
        assert_eq!(canonical_unit("Handful"), "handful");
    }

    #[test]
    fn test_classify_unit() {
        assert_eq!(classify_unit("lbs"), UnitKind::Weight);
        assert_eq!(classify_unit("teaspoons"), UnitKind::Volume);
        assert_eq!(classify_unit("jar"), UnitKind::Count);
        assert_eq!(classify_unit("bunch"), UnitKind::Unknown);
    }

    #[test]
    fn test_split_unit_and_name() {
        assert_eq!(
            split_unit_and_name("cups of flour"),
            ("cups".to_string(), "flour".to_string())
        );
        assert_eq!(
            split_unit_and_name("fl oz milk"),
            ("fl oz".to_string(), "milk".to_string())
        );
        assert_eq!(
            split_unit_and_name("eggs"),
            (String::new(), "eggs".to_string())
        );
        assert_eq!(
            split_unit_and_name("ripe bananas"),
            (String::new(), "ripe bananas".to_string())
        );
        assert_eq!(split_unit_and_name("g"), ("g".to_string(), String::new()));
    }
}
