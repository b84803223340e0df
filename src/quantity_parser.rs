//! # Quantity Parser
//!
//! Turns free-text measures into an amount and the remaining unit text.
//!
//! Forms are tried in priority order:
//!
//! 1. Mixed fractions: "1 1/2 cups"
//! 2. Simple fractions: "3/4 cup"
//! 3. Ranges: "2-3 cups" (midpoint)
//! 4. A leading decimal or integer: "500g", "2.5 cups"
//!
//! Text without a leading number comes back with an amount of zero and the
//! whole text as the unit, so later category inference can still look at it.
//!
//! ```rust
//! use mealwise::quantity_parser::parse_quantity_unit;
//!
//! let parsed = parse_quantity_unit("1 1/2 cups");
//! assert_eq!(parsed.amount, 1.5);
//! assert_eq!(parsed.unit, "cups");
//! ```

use crate::measurement_patterns::{
    DECIMAL_REGEX, MIXED_FRACTION_REGEX, RANGE_REGEX, SIMPLE_FRACTION_REGEX, UNICODE_FRACTIONS,
};
use log::{trace, warn};
use serde::{Deserialize, Serialize};

/// Amount and unit text recovered from a measure string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuantity {
    /// Numeric amount, zero when no leading number was found
    pub amount: f64,
    /// Everything after the number, trimmed (e.g. "cups", "g", "cups flour")
    pub unit: String,
}

impl ParsedQuantity {
    fn new(amount: f64, unit: &str) -> Self {
        Self {
            amount,
            unit: unit.trim().to_string(),
        }
    }

    /// Whether a leading number was recognised
    pub fn has_amount(&self) -> bool {
        self.amount > f64::EPSILON
    }
}

/// Parse a free-text measure into `{amount, unit}`.
///
/// Never fails: unrecognised text yields `{amount: 0, unit: text}`.
pub fn parse_quantity_unit(text: &str) -> ParsedQuantity {
    let expanded = expand_unicode_fractions(text);
    let input = expanded.trim();

    if let Some(parsed) = parse_mixed_fraction(input) {
        trace!("Parsed mixed fraction '{}' -> {:?}", input, parsed);
        return parsed;
    }

    if let Some(parsed) = parse_simple_fraction(input) {
        trace!("Parsed simple fraction '{}' -> {:?}", input, parsed);
        return parsed;
    }

    if let Some(parsed) = parse_range(input) {
        trace!("Parsed range '{}' -> {:?}", input, parsed);
        return parsed;
    }

    if let Some(captures) = DECIMAL_REGEX.captures(input) {
        if let Ok(amount) = captures[1].parse::<f64>() {
            return ParsedQuantity::new(amount, &captures[2]);
        }
    }

    trace!("No leading quantity in '{}'", text);
    ParsedQuantity::new(0.0, text)
}

fn parse_mixed_fraction(input: &str) -> Option<ParsedQuantity> {
    let captures = MIXED_FRACTION_REGEX.captures(input)?;
    let whole: f64 = captures[1].parse().ok()?;
    let fraction = fraction_value(&captures[2], &captures[3])?;
    Some(ParsedQuantity::new(whole + fraction, &captures[4]))
}

fn parse_simple_fraction(input: &str) -> Option<ParsedQuantity> {
    let captures = SIMPLE_FRACTION_REGEX.captures(input)?;
    let fraction = fraction_value(&captures[1], &captures[2])?;
    Some(ParsedQuantity::new(fraction, &captures[3]))
}

fn parse_range(input: &str) -> Option<ParsedQuantity> {
    let captures = RANGE_REGEX.captures(input)?;
    let min: f64 = captures[1].parse().ok()?;
    let max: f64 = captures[2].parse().ok()?;
    Some(ParsedQuantity::new((min + max) / 2.0, &captures[3]))
}

fn fraction_value(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: u32 = numerator.parse().ok()?;
    let denominator: u32 = denominator.parse().ok()?;
    if denominator == 0 {
        warn!("Ignoring fraction {}/0", numerator);
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

/// Rewrite unicode vulgar fractions as ASCII ("1½" -> "1 1/2 ")
fn expand_unicode_fractions(text: &str) -> String {
    if !text.chars().any(|c| UNICODE_FRACTIONS.iter().any(|(f, _, _)| *f == c)) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match UNICODE_FRACTIONS.iter().find(|(f, _, _)| *f == c) {
            Some((_, n, d)) => out.push_str(&format!(" {n}/{d} ")),
            None => out.push(c),
        }
    }
    out
}
