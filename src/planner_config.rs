//! # Planner Configuration Module
//!
//! Tunables for serving estimation, portion scaling and message language.
//! Defaults match the values the app has always used; the binary can
//! override them from `MEALWISE_*` environment variables.

use crate::planner_errors::PlannerError;
use log::debug;
use std::str::FromStr;

// Serving estimation defaults
pub const DEFAULT_MIN_SERVINGS: u32 = 1;
pub const DEFAULT_MAX_SERVINGS: u32 = 12;
pub const DEFAULT_EGGS_PER_SERVING: f64 = 2.0;
pub const DEFAULT_SLICES_PER_SERVING: f64 = 2.0;
pub const DEFAULT_PROTEIN_GRAMS_PER_SERVING: f64 = 150.0;
pub const DEFAULT_CALORIES_PER_SERVING: f64 = 600.0;

// Portion scaling defaults
pub const DEFAULT_MIN_PORTION_MULTIPLIER: f64 = 0.5;
pub const DEFAULT_MAX_PORTION_MULTIPLIER: f64 = 2.0;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Serving estimation settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServingEstimatorConfig {
    /// Lower clamp for estimated servings
    pub min_servings: u32,
    /// Upper clamp for estimated servings
    pub max_servings: u32,
    /// Eggs eaten per serving
    pub eggs_per_serving: f64,
    /// Bread slices or muffins per serving
    pub slices_per_serving: f64,
    /// Grams of meat, fish or egg per serving
    pub protein_grams_per_serving: f64,
    /// Calories per serving
    pub calories_per_serving: f64,
}

impl Default for ServingEstimatorConfig {
    fn default() -> Self {
        Self {
            min_servings: DEFAULT_MIN_SERVINGS,
            max_servings: DEFAULT_MAX_SERVINGS,
            eggs_per_serving: DEFAULT_EGGS_PER_SERVING,
            slices_per_serving: DEFAULT_SLICES_PER_SERVING,
            protein_grams_per_serving: DEFAULT_PROTEIN_GRAMS_PER_SERVING,
            calories_per_serving: DEFAULT_CALORIES_PER_SERVING,
        }
    }
}

impl ServingEstimatorConfig {
    /// Clamp range for estimated servings, lower bound first
    pub fn servings_range(&self) -> (u32, u32) {
        let low = self.min_servings.min(self.max_servings);
        let high = self.min_servings.max(self.max_servings);
        (low, high)
    }
}

/// Portion scaling settings for meal recommendations
#[derive(Debug, Clone, PartialEq)]
pub struct PortionConfig {
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for PortionConfig {
    fn default() -> Self {
        Self {
            min_multiplier: DEFAULT_MIN_PORTION_MULTIPLIER,
            max_multiplier: DEFAULT_MAX_PORTION_MULTIPLIER,
        }
    }
}

impl PortionConfig {
    /// Clamp range for portion multipliers, lower bound first.
    ///
    /// A NaN or infinite bound is replaced by its default.
    pub fn multiplier_range(&self) -> (f64, f64) {
        let finite_or = |value: f64, default: f64| if value.is_finite() { value } else { default };
        let min = finite_or(self.min_multiplier, DEFAULT_MIN_PORTION_MULTIPLIER);
        let max = finite_or(self.max_multiplier, DEFAULT_MAX_PORTION_MULTIPLIER);
        (min.min(max), min.max(max))
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub servings: ServingEstimatorConfig,
    pub portions: PortionConfig,
    /// Language for user-facing reasons ("en", "fr")
    pub language: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            servings: ServingEstimatorConfig::default(),
            portions: PortionConfig::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self, PlannerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(language) = lookup("MEALWISE_LANGUAGE") {
            if !language.trim().is_empty() {
                config.language = language.trim().to_string();
            }
        }

        override_value(&lookup, "MEALWISE_MAX_SERVINGS", &mut config.servings.max_servings)?;
        override_value(
            &lookup,
            "MEALWISE_PROTEIN_GRAMS_PER_SERVING",
            &mut config.servings.protein_grams_per_serving,
        )?;
        override_value(
            &lookup,
            "MEALWISE_CALORIES_PER_SERVING",
            &mut config.servings.calories_per_serving,
        )?;
        override_value(&lookup, "MEALWISE_MIN_PORTION", &mut config.portions.min_multiplier)?;
        override_value(&lookup, "MEALWISE_MAX_PORTION", &mut config.portions.max_multiplier)?;

        config.validate()?;
        debug!("Loaded planner configuration: {:?}", config);
        Ok(config)
    }

    /// Reject values the estimators cannot work with
    pub fn validate(&self) -> Result<(), PlannerError> {
        let servings = &self.servings;
        if servings.max_servings < servings.min_servings || servings.min_servings == 0 {
            return Err(PlannerError::Config {
                key: "MEALWISE_MAX_SERVINGS".to_string(),
                value: servings.max_servings.to_string(),
            });
        }
        for (key, value) in [
            ("MEALWISE_PROTEIN_GRAMS_PER_SERVING", servings.protein_grams_per_serving),
            ("MEALWISE_CALORIES_PER_SERVING", servings.calories_per_serving),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(PlannerError::Config {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let portions = &self.portions;
        if !portions.max_multiplier.is_finite() {
            return Err(PlannerError::Config {
                key: "MEALWISE_MAX_PORTION".to_string(),
                value: portions.max_multiplier.to_string(),
            });
        }
        if !portions.min_multiplier.is_finite()
            || portions.min_multiplier <= 0.0
            || portions.min_multiplier > portions.max_multiplier
        {
            return Err(PlannerError::Config {
                key: "MEALWISE_MIN_PORTION".to_string(),
                value: portions.min_multiplier.to_string(),
            });
        }
        Ok(())
    }
}

fn override_value<F, T>(lookup: &F, key: &str, target: &mut T) -> Result<(), PlannerError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| PlannerError::Config {
            key: key.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.servings.min_servings, 1);
        assert_eq!(config.servings.max_servings, 12);
        assert_eq!(config.servings.protein_grams_per_serving, 150.0);
        assert_eq!(config.servings.calories_per_serving, 600.0);
        assert_eq!(config.portions.min_multiplier, 0.5);
        assert_eq!(config.portions.max_multiplier, 2.0);
        assert_eq!(config.language, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_lookup_gives_defaults() {
        let config = PlannerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("MEALWISE_LANGUAGE", "fr"),
            ("MEALWISE_MAX_SERVINGS", "8"),
            ("MEALWISE_CALORIES_PER_SERVING", " 500 "),
            ("MEALWISE_MAX_PORTION", "1.5"),
        ]))
        .unwrap();

        assert_eq!(config.language, "fr");
        assert_eq!(config.servings.max_servings, 8);
        assert_eq!(config.servings.calories_per_serving, 500.0);
        assert_eq!(config.portions.max_multiplier, 1.5);
    }

    #[test]
    fn test_invalid_number() {
        let err = PlannerConfig::from_lookup(lookup_from(&[("MEALWISE_MAX_SERVINGS", "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            PlannerError::Config {
                key: "MEALWISE_MAX_SERVINGS".to_string(),
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn test_inverted_portion_range() {
        let result = PlannerConfig::from_lookup(lookup_from(&[
            ("MEALWISE_MIN_PORTION", "3.0"),
            ("MEALWISE_MAX_PORTION", "2.0"),
        ]));
        assert!(matches!(result, Err(PlannerError::Config { .. })));
    }

    #[test]
    fn test_zero_calories_per_serving_rejected() {
        let result =
            PlannerConfig::from_lookup(lookup_from(&[("MEALWISE_CALORIES_PER_SERVING", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_portions_rejected() {
        for (key, value) in [
            ("MEALWISE_MIN_PORTION", "NaN"),
            ("MEALWISE_MAX_PORTION", "NaN"),
            ("MEALWISE_MAX_PORTION", "inf"),
        ] {
            let result = PlannerConfig::from_lookup(lookup_from(&[(key, value)]));
            assert!(
                matches!(result, Err(PlannerError::Config { .. })),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }

    #[test]
    fn test_ranges_are_ordered() {
        let portions = PortionConfig {
            min_multiplier: f64::NAN,
            max_multiplier: 0.25,
        };
        assert_eq!(portions.multiplier_range(), (0.25, 0.5));

        let servings = ServingEstimatorConfig {
            min_servings: 10,
            max_servings: 2,
            ..ServingEstimatorConfig::default()
        };
        assert_eq!(servings.servings_range(), (2, 10));
    }
}
