//! # Meal Recommendation Module
//!
//! Template-based meal suggestions. A request carries what is left of the
//! day's calorie and protein targets plus the meal slot; the engine picks a
//! template pool, drops templates that break a dietary restriction, scales
//! portions toward the slot's calorie target and ranks the results by how
//! well they close the gap.
//!
//! ## Usage
//!
//! ```rust
//! use mealwise::meal_recommendation::{MealRecommendationEngine, MealRequest, MealType};
//!
//! let request = MealRequest::new(900.0, 15.0, MealType::Dinner);
//! let recommendations = MealRecommendationEngine::new().recommend(&request);
//! assert!(!recommendations.is_empty());
//! ```

use crate::localization::{t_args_lang, t_lang, DEFAULT_LANGUAGE};
use crate::nutrition_aggregator::round_to_tenth;
use crate::planner_config::PortionConfig;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Protein share of remaining calories above which protein is prioritised
pub const HIGH_PROTEIN_CALORIE_RATIO: f64 = 0.4;
/// Remaining protein (g) above which protein is prioritised
pub const HIGH_PROTEIN_REMAINING_GRAMS: f64 = 20.0;
/// Remaining calories below which a weight-loss user gets light meals
pub const LOW_CALORIE_THRESHOLD: f64 = 300.0;

const CALORIES_PER_GRAM_PROTEIN: f64 = 4.0;

// Urgency scoring
const CALORIE_FIT_WEIGHT: f64 = 0.6;
const PROTEIN_COVERAGE_WEIGHT: f64 = 0.4;
const HIGH_URGENCY_SCORE: f64 = 0.8;
const MEDIUM_URGENCY_SCORE: f64 = 0.5;

/// Meal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Meal slot for an hour of the day (0-23)
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => MealType::Breakfast,
            11..=15 => MealType::Lunch,
            16..=21 => MealType::Dinner,
            _ => MealType::Snack,
        }
    }

    /// Share of the remaining calories this slot should cover
    pub fn calorie_share(self) -> f64 {
        match self {
            MealType::Breakfast => 0.3,
            MealType::Lunch => 0.45,
            MealType::Dinner => 1.0,
            MealType::Snack => 0.15,
        }
    }

    fn message_key(self) -> &'static str {
        match self {
            MealType::Breakfast => "meal-breakfast",
            MealType::Lunch => "meal-lunch",
            MealType::Dinner => "meal-dinner",
            MealType::Snack => "meal-snack",
        }
    }
}

/// User's nutrition goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WeightLoss,
    #[default]
    Maintenance,
    MuscleGain,
}

/// Keyword-based dietary restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    DairyFree,
    GlutenFree,
    NutFree,
}

const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "turkey", "lamb", "bacon", "ham", "sausage", "fish", "salmon",
    "tuna", "cod", "shrimp", "prawn", "anchovy",
];

const ANIMAL_PRODUCT_KEYWORDS: &[&str] = &["egg", "honey", "gelatin"];

const DAIRY_KEYWORDS: &[&str] = &[
    "milk", "cheese", "yogurt", "yoghurt", "butter", "cream", "whey", "feta", "parmesan",
    "mozzarella", "tzatziki",
];

const GLUTEN_KEYWORDS: &[&str] = &[
    "bread", "pasta", "flour", "wheat", "barley", "rye", "couscous", "tortilla", "noodle",
    "cracker", "granola",
];

const NUT_KEYWORDS: &[&str] = &[
    "almond", "walnut", "cashew", "peanut", "pecan", "pistachio", "hazelnut", "macadamia",
];

/// Phrases that contain a restricted keyword without being restricted
const KEYWORD_EXCEPTIONS: &[&str] = &[
    "peanut butter",
    "almond butter",
    "almond milk",
    "oat milk",
    "soy milk",
    "coconut milk",
    "coconut cream",
    "eggplant",
    "veggie",
    "zucchini noodles",
];

impl DietaryRestriction {
    fn excluded_keywords(self) -> Vec<&'static str> {
        match self {
            DietaryRestriction::Vegetarian => MEAT_KEYWORDS.to_vec(),
            DietaryRestriction::Vegan => [MEAT_KEYWORDS, ANIMAL_PRODUCT_KEYWORDS, DAIRY_KEYWORDS].concat(),
            DietaryRestriction::DairyFree => DAIRY_KEYWORDS.to_vec(),
            DietaryRestriction::GlutenFree => GLUTEN_KEYWORDS.to_vec(),
            DietaryRestriction::NutFree => NUT_KEYWORDS.to_vec(),
        }
    }

    /// Whether an ingredient name breaks this restriction
    pub fn excludes(self, ingredient_name: &str) -> bool {
        let mut name = ingredient_name.to_lowercase();
        for exception in KEYWORD_EXCEPTIONS {
            // Nut-based exceptions still contain nuts
            if self == DietaryRestriction::NutFree && NUT_KEYWORDS.iter().any(|k| exception.contains(k)) {
                continue;
            }
            name = name.replace(exception, " ");
        }
        self.excluded_keywords()
            .iter()
            .any(|keyword| name.contains(keyword))
    }
}

/// Which kind of meal to suggest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationType {
    HighProtein,
    LowCalorie,
    Balanced,
}

/// How strongly a suggestion closes the remaining gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    fn from_score(score: f64) -> Self {
        if score >= HIGH_URGENCY_SCORE {
            Urgency::High
        } else if score >= MEDIUM_URGENCY_SCORE {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Remaining targets for the rest of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    pub remaining_calories: f64,
    pub remaining_protein: f64,
    pub meal_type: MealType,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub restrictions: Vec<DietaryRestriction>,
}

impl MealRequest {
    pub fn new(remaining_calories: f64, remaining_protein: f64, meal_type: MealType) -> Self {
        Self {
            remaining_calories,
            remaining_protein,
            meal_type,
            goal: Goal::default(),
            restrictions: Vec::new(),
        }
    }

    /// Request for the meal slot at a given hour
    pub fn at_hour(remaining_calories: f64, remaining_protein: f64, hour: u32) -> Self {
        Self::new(remaining_calories, remaining_protein, MealType::from_hour(hour))
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_restrictions(mut self, restrictions: &[DietaryRestriction]) -> Self {
        self.restrictions = restrictions.to_vec();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateIngredient {
    pub name: &'static str,
    pub amount: f64,
    pub unit: &'static str,
}

/// A meal at its base portion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealTemplate {
    pub name: &'static str,
    pub recommendation_type: RecommendationType,
    pub meal_type: MealType,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub ingredients: &'static [TemplateIngredient],
    pub prep_time_minutes: u32,
    pub difficulty: Difficulty,
}

const fn ingredient(name: &'static str, amount: f64, unit: &'static str) -> TemplateIngredient {
    TemplateIngredient { name, amount, unit }
}

const fn template(
    name: &'static str,
    recommendation_type: RecommendationType,
    meal_type: MealType,
    macros: (f64, f64, f64, f64),
    ingredients: &'static [TemplateIngredient],
    prep_time_minutes: u32,
    difficulty: Difficulty,
) -> MealTemplate {
    MealTemplate {
        name,
        recommendation_type,
        meal_type,
        calories: macros.0,
        protein: macros.1,
        carbs: macros.2,
        fats: macros.3,
        ingredients,
        prep_time_minutes,
        difficulty,
    }
}

use Difficulty::{Easy, Medium};
use MealType::{Breakfast, Dinner, Lunch, Snack};
use RecommendationType::{Balanced, HighProtein, LowCalorie};

/// Template pool, grouped by recommendation type then meal slot
pub const MEAL_TEMPLATES: &[MealTemplate] = &[
    // Balanced
    template(
        "Oatmeal with Berries",
        Balanced,
        Breakfast,
        (350.0, 12.0, 58.0, 8.0),
        &[
            ingredient("rolled oats", 60.0, "g"),
            ingredient("milk", 200.0, "ml"),
            ingredient("mixed berries", 80.0, "g"),
            ingredient("honey", 1.0, "tsp"),
        ],
        10,
        Easy,
    ),
    template(
        "Avocado Toast with Egg",
        Balanced,
        Breakfast,
        (380.0, 16.0, 32.0, 21.0),
        &[
            ingredient("whole grain bread", 2.0, "slices"),
            ingredient("avocado", 0.5, "pcs"),
            ingredient("egg", 1.0, "pcs"),
        ],
        10,
        Easy,
    ),
    template(
        "Chicken Quinoa Bowl",
        Balanced,
        Lunch,
        (520.0, 38.0, 48.0, 18.0),
        &[
            ingredient("chicken breast", 120.0, "g"),
            ingredient("quinoa", 75.0, "g"),
            ingredient("mixed vegetables", 150.0, "g"),
            ingredient("olive oil", 1.0, "tbsp"),
        ],
        25,
        Medium,
    ),
    template(
        "Lentil Soup",
        Balanced,
        Lunch,
        (420.0, 22.0, 62.0, 8.0),
        &[
            ingredient("red lentils", 80.0, "g"),
            ingredient("carrot", 1.0, "pcs"),
            ingredient("onion", 1.0, "pcs"),
            ingredient("vegetable stock", 400.0, "ml"),
        ],
        30,
        Easy,
    ),
    template(
        "Salmon with Rice and Broccoli",
        Balanced,
        Dinner,
        (600.0, 40.0, 55.0, 22.0),
        &[
            ingredient("salmon fillet", 150.0, "g"),
            ingredient("brown rice", 75.0, "g"),
            ingredient("broccoli", 150.0, "g"),
        ],
        30,
        Medium,
    ),
    template(
        "Tofu Vegetable Stir-Fry",
        Balanced,
        Dinner,
        (480.0, 26.0, 52.0, 18.0),
        &[
            ingredient("firm tofu", 150.0, "g"),
            ingredient("mixed vegetables", 200.0, "g"),
            ingredient("brown rice", 60.0, "g"),
            ingredient("sesame oil", 1.0, "tsp"),
        ],
        20,
        Easy,
    ),
    template(
        "Apple with Peanut Butter",
        Balanced,
        Snack,
        (250.0, 7.0, 28.0, 14.0),
        &[
            ingredient("apple", 1.0, "pcs"),
            ingredient("peanut butter", 1.5, "tbsp"),
        ],
        2,
        Easy,
    ),
    template(
        "Hummus and Carrot Sticks",
        Balanced,
        Snack,
        (180.0, 6.0, 20.0, 9.0),
        &[ingredient("hummus", 60.0, "g"), ingredient("carrot", 2.0, "pcs")],
        5,
        Easy,
    ),
    // High protein
    template(
        "Greek Yogurt Parfait",
        HighProtein,
        Breakfast,
        (320.0, 28.0, 35.0, 8.0),
        &[
            ingredient("greek yogurt", 250.0, "g"),
            ingredient("mixed berries", 80.0, "g"),
            ingredient("granola", 30.0, "g"),
        ],
        5,
        Easy,
    ),
    template(
        "Scrambled Eggs with Spinach",
        HighProtein,
        Breakfast,
        (300.0, 24.0, 4.0, 20.0),
        &[
            ingredient("egg", 3.0, "pcs"),
            ingredient("spinach", 60.0, "g"),
            ingredient("olive oil", 1.0, "tsp"),
        ],
        10,
        Easy,
    ),
    template(
        "Grilled Chicken Salad",
        HighProtein,
        Lunch,
        (450.0, 45.0, 15.0, 22.0),
        &[
            ingredient("chicken breast", 150.0, "g"),
            ingredient("mixed greens", 100.0, "g"),
            ingredient("feta cheese", 30.0, "g"),
            ingredient("olive oil", 1.0, "tbsp"),
        ],
        20,
        Easy,
    ),
    template(
        "Tuna and Chickpea Salad",
        HighProtein,
        Lunch,
        (430.0, 38.0, 35.0, 14.0),
        &[
            ingredient("tuna", 1.0, "can"),
            ingredient("chickpeas", 120.0, "g"),
            ingredient("red onion", 0.5, "pcs"),
        ],
        10,
        Easy,
    ),
    template(
        "Lean Beef Stir-Fry",
        HighProtein,
        Dinner,
        (550.0, 45.0, 40.0, 20.0),
        &[
            ingredient("lean beef", 150.0, "g"),
            ingredient("broccoli", 150.0, "g"),
            ingredient("brown rice", 60.0, "g"),
        ],
        25,
        Medium,
    ),
    template(
        "Tempeh with Lentils and Spinach",
        HighProtein,
        Dinner,
        (520.0, 42.0, 45.0, 18.0),
        &[
            ingredient("tempeh", 150.0, "g"),
            ingredient("green lentils", 70.0, "g"),
            ingredient("spinach", 80.0, "g"),
        ],
        30,
        Medium,
    ),
    template(
        "Cottage Cheese with Pineapple",
        HighProtein,
        Snack,
        (200.0, 24.0, 14.0, 5.0),
        &[
            ingredient("cottage cheese", 200.0, "g"),
            ingredient("pineapple", 80.0, "g"),
        ],
        2,
        Easy,
    ),
    template(
        "Steamed Edamame",
        HighProtein,
        Snack,
        (190.0, 17.0, 14.0, 8.0),
        &[ingredient("edamame", 150.0, "g")],
        5,
        Easy,
    ),
    // Low calorie
    template(
        "Egg White Omelette",
        LowCalorie,
        Breakfast,
        (180.0, 22.0, 6.0, 6.0),
        &[
            ingredient("egg white", 150.0, "ml"),
            ingredient("spinach", 50.0, "g"),
            ingredient("tomato", 1.0, "pcs"),
        ],
        10,
        Easy,
    ),
    template(
        "Vegetable Soup",
        LowCalorie,
        Lunch,
        (220.0, 8.0, 35.0, 5.0),
        &[
            ingredient("mixed vegetables", 250.0, "g"),
            ingredient("vegetable stock", 300.0, "ml"),
            ingredient("chickpeas", 40.0, "g"),
        ],
        25,
        Easy,
    ),
    template(
        "Zucchini Noodles with Turkey Meatballs",
        LowCalorie,
        Dinner,
        (350.0, 32.0, 18.0, 15.0),
        &[
            ingredient("zucchini noodles", 250.0, "g"),
            ingredient("turkey mince", 120.0, "g"),
            ingredient("tomato sauce", 100.0, "ml"),
        ],
        30,
        Medium,
    ),
    template(
        "Tofu Vegetable Skewers",
        LowCalorie,
        Dinner,
        (280.0, 20.0, 22.0, 12.0),
        &[
            ingredient("firm tofu", 120.0, "g"),
            ingredient("bell pepper", 1.0, "pcs"),
            ingredient("zucchini", 1.0, "pcs"),
        ],
        25,
        Easy,
    ),
    template(
        "Cucumber with Tzatziki",
        LowCalorie,
        Snack,
        (110.0, 5.0, 8.0, 6.0),
        &[
            ingredient("cucumber", 1.0, "pcs"),
            ingredient("tzatziki", 80.0, "g"),
        ],
        5,
        Easy,
    ),
    template(
        "Apple Slices",
        LowCalorie,
        Snack,
        (95.0, 0.5, 25.0, 0.3),
        &[ingredient("apple", 1.0, "pcs")],
        2,
        Easy,
    ),
];

/// An ingredient at the recommended portion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// A portion-scaled meal suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecommendation {
    pub name: String,
    pub recommendation_type: RecommendationType,
    pub meal_type: MealType,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub ingredients: Vec<ScaledIngredient>,
    pub prep_time_minutes: u32,
    pub difficulty: Difficulty,
    pub portion_multiplier: f64,
    pub urgency: Urgency,
    pub reason: String,
}

/// Classify what the rest of the day needs most
pub fn determine_recommendation_type(request: &MealRequest) -> RecommendationType {
    let protein_calorie_ratio = if request.remaining_calories > 0.0 {
        request.remaining_protein * CALORIES_PER_GRAM_PROTEIN / request.remaining_calories
    } else {
        0.0
    };

    if protein_calorie_ratio > HIGH_PROTEIN_CALORIE_RATIO
        || request.remaining_protein > HIGH_PROTEIN_REMAINING_GRAMS
    {
        RecommendationType::HighProtein
    } else if request.remaining_calories < LOW_CALORIE_THRESHOLD && request.goal == Goal::WeightLoss {
        RecommendationType::LowCalorie
    } else {
        RecommendationType::Balanced
    }
}

/// Portion ratio toward a calorie target, clamped to the configured range.
/// A non-positive base keeps the template as is.
pub fn calculate_portion_multiplier(
    target_calories: f64,
    base_calories: f64,
    portions: &PortionConfig,
) -> f64 {
    if base_calories <= 0.0 {
        return 1.0;
    }
    let (min, max) = portions.multiplier_range();
    (target_calories / base_calories).clamp(min, max)
}

/// Templates whose ingredients break none of the restrictions
pub fn filter_by_dietary_restrictions<'a>(
    templates: &[&'a MealTemplate],
    restrictions: &[DietaryRestriction],
) -> Vec<&'a MealTemplate> {
    templates
        .iter()
        .filter(|template| {
            !template.ingredients.iter().any(|ingredient| {
                restrictions
                    .iter()
                    .any(|restriction| restriction.excludes(ingredient.name))
            })
        })
        .copied()
        .collect()
}

/// Meal suggestion generator
pub struct MealRecommendationEngine {
    portions: PortionConfig,
    language: String,
}

impl MealRecommendationEngine {
    pub fn new() -> Self {
        Self::with_config(PortionConfig::default())
    }

    pub fn with_config(portions: PortionConfig) -> Self {
        Self {
            portions,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the language for reasons
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Suggestions for the request, most urgent first
    pub fn recommend(&self, request: &MealRequest) -> Vec<MealRecommendation> {
        let recommendation_type = determine_recommendation_type(request);
        let mut candidates = self.candidates(recommendation_type, request);

        if candidates.is_empty() && recommendation_type != RecommendationType::Balanced {
            debug!(
                "No {:?} {:?} template fits the restrictions, using balanced pool",
                recommendation_type, request.meal_type
            );
            candidates = self.candidates(RecommendationType::Balanced, request);
        }

        let target_calories = request.remaining_calories.max(0.0) * request.meal_type.calorie_share();
        let target_protein = request.remaining_protein.max(0.0) * request.meal_type.calorie_share();

        let mut recommendations: Vec<MealRecommendation> = candidates
            .into_iter()
            .map(|template| self.scale(template, request, target_calories, target_protein))
            .collect();

        recommendations.sort_by(|a, b| b.urgency.cmp(&a.urgency));

        info!(
            "Recommended {} {:?} meals for {:?}",
            recommendations.len(),
            recommendation_type,
            request.meal_type
        );
        recommendations
    }

    fn candidates(
        &self,
        recommendation_type: RecommendationType,
        request: &MealRequest,
    ) -> Vec<&'static MealTemplate> {
        let pool: Vec<&'static MealTemplate> = MEAL_TEMPLATES
            .iter()
            .filter(|t| t.recommendation_type == recommendation_type && t.meal_type == request.meal_type)
            .collect();
        filter_by_dietary_restrictions(&pool, &request.restrictions)
    }

    fn scale(
        &self,
        template: &MealTemplate,
        request: &MealRequest,
        target_calories: f64,
        target_protein: f64,
    ) -> MealRecommendation {
        let multiplier = calculate_portion_multiplier(target_calories, template.calories, &self.portions);
        let calories = template.calories * multiplier;
        let protein = template.protein * multiplier;

        let calorie_fit = if target_calories > 0.0 {
            (1.0 - (calories - target_calories).abs() / target_calories).max(0.0)
        } else {
            0.0
        };
        let protein_coverage = if target_protein > 0.0 {
            (protein / target_protein).min(1.0)
        } else {
            1.0
        };
        let urgency = Urgency::from_score(
            CALORIE_FIT_WEIGHT * calorie_fit + PROTEIN_COVERAGE_WEIGHT * protein_coverage,
        );

        let rounded_calories = calories.round() as u32;
        let rounded_protein = round_to_tenth(protein);

        MealRecommendation {
            name: template.name.to_string(),
            recommendation_type: template.recommendation_type,
            meal_type: template.meal_type,
            calories: rounded_calories,
            protein: rounded_protein,
            carbs: round_to_tenth(template.carbs * multiplier),
            fats: round_to_tenth(template.fats * multiplier),
            ingredients: template
                .ingredients
                .iter()
                .map(|ingredient| ScaledIngredient {
                    name: ingredient.name.to_string(),
                    amount: round_to_tenth(ingredient.amount * multiplier),
                    unit: ingredient.unit.to_string(),
                })
                .collect(),
            prep_time_minutes: template.prep_time_minutes,
            difficulty: template.difficulty,
            portion_multiplier: round_to_tenth(multiplier),
            urgency,
            reason: self.reason(template, request, rounded_calories, rounded_protein),
        }
    }

    fn reason(
        &self,
        template: &MealTemplate,
        request: &MealRequest,
        calories: u32,
        protein: f64,
    ) -> String {
        let language = Some(self.language.as_str());
        match template.recommendation_type {
            RecommendationType::HighProtein => t_args_lang(
                "recommendation-high-protein",
                &[
                    ("protein", &format!("{:.1}", protein)),
                    (
                        "remaining_protein",
                        &format!("{:.0}", request.remaining_protein.max(0.0)),
                    ),
                ],
                language,
            ),
            RecommendationType::LowCalorie => t_args_lang(
                "recommendation-low-calorie",
                &[("calories", &calories.to_string())],
                language,
            ),
            RecommendationType::Balanced => t_args_lang(
                "recommendation-balanced",
                &[
                    ("meal", &t_lang(template.meal_type.message_key(), language)),
                    ("calories", &calories.to_string()),
                    (
                        "remaining_calories",
                        &format!("{:.0}", request.remaining_calories.max(0.0)),
                    ),
                ],
                language,
            ),
        }
    }
}

impl Default for MealRecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hour() {
        assert_eq!(MealType::from_hour(7), MealType::Breakfast);
        assert_eq!(MealType::from_hour(12), MealType::Lunch);
        assert_eq!(MealType::from_hour(19), MealType::Dinner);
        assert_eq!(MealType::from_hour(23), MealType::Snack);
        assert_eq!(MealType::from_hour(3), MealType::Snack);
    }

    #[test]
    fn test_recommendation_type() {
        // 30g protein left
        let request = MealRequest::new(1200.0, 30.0, MealType::Lunch);
        assert_eq!(determine_recommendation_type(&request), RecommendationType::HighProtein);

        // 20g protein is 80 of 150 calories
        let request = MealRequest::new(150.0, 20.0, MealType::Snack);
        assert_eq!(determine_recommendation_type(&request), RecommendationType::HighProtein);

        let request = MealRequest::new(250.0, 5.0, MealType::Snack).with_goal(Goal::WeightLoss);
        assert_eq!(determine_recommendation_type(&request), RecommendationType::LowCalorie);

        let request = MealRequest::new(250.0, 5.0, MealType::Snack);
        assert_eq!(determine_recommendation_type(&request), RecommendationType::Balanced);

        let request = MealRequest::new(0.0, 0.0, MealType::Dinner);
        assert_eq!(determine_recommendation_type(&request), RecommendationType::Balanced);
    }

    #[test]
    fn test_portion_multiplier_clamped() {
        let portions = PortionConfig::default();
        assert_eq!(calculate_portion_multiplier(1000.0, 250.0, &portions), 2.0);
        assert_eq!(calculate_portion_multiplier(50.0, 500.0, &portions), 0.5);
        assert_eq!(calculate_portion_multiplier(600.0, 400.0, &portions), 1.5);
        assert_eq!(calculate_portion_multiplier(600.0, 0.0, &portions), 1.0);
    }

    #[test]
    fn test_restriction_keywords() {
        assert!(DietaryRestriction::Vegetarian.excludes("chicken breast"));
        assert!(!DietaryRestriction::Vegetarian.excludes("chickpeas"));
        assert!(DietaryRestriction::Vegan.excludes("egg"));
        assert!(!DietaryRestriction::Vegan.excludes("eggplant"));
        assert!(!DietaryRestriction::Vegan.excludes("mixed veggies"));
        assert!(DietaryRestriction::DairyFree.excludes("greek yogurt"));
        assert!(!DietaryRestriction::DairyFree.excludes("peanut butter"));
        assert!(!DietaryRestriction::DairyFree.excludes("coconut milk"));
        assert!(DietaryRestriction::NutFree.excludes("peanut butter"));
        assert!(DietaryRestriction::GlutenFree.excludes("whole grain bread"));
        assert!(!DietaryRestriction::GlutenFree.excludes("zucchini noodles"));
    }

    #[test]
    fn test_filter_combines_restrictions() {
        let pool: Vec<&MealTemplate> = MEAL_TEMPLATES
            .iter()
            .filter(|t| t.meal_type == MealType::Breakfast && t.recommendation_type == RecommendationType::Balanced)
            .collect();

        let vegetarian = filter_by_dietary_restrictions(&pool, &[DietaryRestriction::Vegetarian]);
        assert_eq!(vegetarian.len(), 2);

        let strict = filter_by_dietary_restrictions(
            &pool,
            &[DietaryRestriction::DairyFree, DietaryRestriction::GlutenFree],
        );
        assert!(strict.is_empty());
    }

    #[test]
    fn test_every_slot_has_templates() {
        for recommendation_type in [
            RecommendationType::HighProtein,
            RecommendationType::LowCalorie,
            RecommendationType::Balanced,
        ] {
            for meal_type in [MealType::Breakfast, MealType::Lunch, MealType::Dinner, MealType::Snack] {
                assert!(MEAL_TEMPLATES
                    .iter()
                    .any(|t| t.recommendation_type == recommendation_type && t.meal_type == meal_type));
            }
        }
    }
}
