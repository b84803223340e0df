//! # Ingredient and Recipe Data Model
//!
//! This module defines the recipe-side data structures. Recipe sources hand us
//! ingredients in several loose shapes (a bare "2 cups flour" string, objects
//! with `amount` or `quantity`, `name` or only `original`), so everything is
//! normalised into a single [`Ingredient`] type at the deserialisation
//! boundary and the rest of the crate only ever sees that.
//!
//! ## Usage
//!
//! ```rust
//! use mealwise::ingredient_model::{Ingredient, Recipe};
//!
//! let flour = Ingredient::new("flour").with_amount(2.0, "cups");
//! let eggs = Ingredient::from_text("3 eggs");
//!
//! let recipe = Recipe::new("pancakes", "Pancakes", vec![flour, eggs]);
//! assert_eq!(recipe.ingredients[1].name, "eggs");
//! assert_eq!(recipe.ingredients[1].amount, Some(3.0));
//! ```

use crate::quantity_parser::{parse_quantity_unit, ParsedQuantity};
use crate::unit_conversion::split_unit_and_name;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Amounts below this are treated as absent
pub const AMOUNT_EPSILON: f64 = 1e-6;

/// A single recipe ingredient after boundary normalisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IngredientInput")]
pub struct Ingredient {
    /// Free-text name (e.g. "chicken breast", "all-purpose flour")
    pub name: String,

    /// Numeric amount, absent or zero when the source did not give one
    pub amount: Option<f64>,

    /// Free-text unit (e.g. "cups", "g", "cloves")
    pub unit: Option<String>,

    /// Original line such as "2 cups flour", used to recover a missing amount
    pub original: Option<String>,
}

impl Ingredient {
    /// Create a new ingredient with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            amount: None,
            unit: None,
            original: None,
        }
    }

    /// Parse a bare ingredient line such as "2 cups flour"
    pub fn from_text(text: &str) -> Self {
        let parsed = parse_quantity_unit(text);
        let (unit, name) = split_unit_and_name(&parsed.unit);
        Self {
            name,
            amount: parsed.has_amount().then_some(parsed.amount),
            unit: non_empty(&unit),
            original: non_empty(text),
        }
    }

    /// Set the amount and unit
    pub fn with_amount(mut self, amount: f64, unit: &str) -> Self {
        self.amount = Some(amount);
        self.unit = non_empty(unit);
        self
    }

    /// Set the original text
    pub fn with_original(mut self, original: &str) -> Self {
        self.original = non_empty(original);
        self
    }

    /// Amount and unit to use for conversion.
    ///
    /// When the amount is absent or near zero and an original line is present,
    /// the original is re-parsed and only its unit word is kept, never the
    /// ingredient name that follows it. A unit given explicitly wins over the
    /// one recovered from the original text.
    pub fn resolved_quantity(&self) -> ParsedQuantity {
        let amount = self.amount.unwrap_or(0.0);
        let unit = self.unit.clone().unwrap_or_default();

        if amount.abs() < AMOUNT_EPSILON {
            if let Some(original) = self.original.as_deref() {
                let parsed = parse_quantity_unit(original);
                if parsed.has_amount() {
                    let unit = if unit.trim().is_empty() {
                        split_unit_and_name(&parsed.unit).0
                    } else {
                        unit
                    };
                    return ParsedQuantity {
                        amount: parsed.amount,
                        unit,
                    };
                }
            }
        }

        ParsedQuantity { amount, unit }
    }
}

/// A recipe as supplied by import or authoring features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Display title
    #[serde(default, alias = "name")]
    pub title: String,

    /// Ingredient list, possibly empty
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// Declared servings, if the source had them
    #[serde(default, deserialize_with = "loose_servings")]
    pub servings: Option<u32>,
}

impl Recipe {
    /// Create a recipe without declared servings
    pub fn new(id: &str, title: &str, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            ingredients,
            servings: None,
        }
    }

    /// Declare a servings count
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }
}

/// Any ingredient shape we accept on input
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientInput {
    /// A bare line: "2 cups flour"
    Text(String),
    /// An object with some of name/amount/unit/original
    Structured(StructuredIngredient),
}

/// Object-shaped ingredient input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredIngredient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "quantity")]
    pub amount: Option<AmountValue>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, alias = "text")]
    pub original: Option<String>,
}

/// Amounts arrive either as numbers or as text like "1 1/2"
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Number(f64),
    Text(String),
}

impl From<IngredientInput> for Ingredient {
    fn from(input: IngredientInput) -> Self {
        match input {
            IngredientInput::Text(text) => Ingredient::from_text(&text),
            IngredientInput::Structured(structured) => structured.into(),
        }
    }
}

impl From<StructuredIngredient> for Ingredient {
    fn from(input: StructuredIngredient) -> Self {
        let mut unit = input.unit.as_deref().and_then(non_empty);

        let amount = match input.amount {
            Some(AmountValue::Number(n)) => Some(n),
            Some(AmountValue::Text(text)) => {
                let parsed = parse_quantity_unit(&text);
                if unit.is_none() {
                    unit = non_empty(&parsed.unit);
                }
                parsed.has_amount().then_some(parsed.amount)
            }
            None => None,
        };

        let name = match input.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => input
                .original
                .as_deref()
                .map(|original| Ingredient::from_text(original).name)
                .unwrap_or_default(),
        };

        Self {
            name,
            amount,
            unit,
            original: input.original.as_deref().and_then(non_empty),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(amount) = self.amount {
            if amount.fract() == 0.0 {
                write!(f, "{} ", amount as i64)?;
            } else {
                write!(f, "{} ", amount)?;
            }
        }
        if let Some(unit) = &self.unit {
            write!(f, "{} ", unit)?;
        }
        write!(f, "{}", self.name)
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(n) => n.to_string(),
    })
}

/// Servings arrive as 4, 4.0, "4" or "4-6"; anything without a positive
/// count reads as undeclared
fn loose_servings<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Option::<AmountValue>::deserialize(deserializer)? {
        Some(AmountValue::Number(n)) => n,
        Some(AmountValue::Text(text)) => parse_quantity_unit(&text).amount,
        None => return Ok(None),
    };

    let rounded = count.round();
    Ok((rounded.is_finite() && rounded >= 1.0).then_some(rounded as u32))
}
