//! # Measurement Patterns Module
//!
//! This module contains regex patterns and constants used to pull a leading
//! quantity off free-text measures such as "1 1/2 cups" or "500g".

use lazy_static::lazy_static;
use regex::Regex;

/// Mixed fraction: "1 1/2 cups"
pub const MIXED_FRACTION_PATTERN: &str = r"^(\d+)\s+(\d+)\s*/\s*(\d+)\s*(.*)$";

/// Simple fraction: "3/4 cup", "1/2tsp"
pub const SIMPLE_FRACTION_PATTERN: &str = r"^(\d+)\s*/\s*(\d+)\s*(.*)$";

/// Range: "2-3 cups", "2 to 3 cups"
pub const RANGE_PATTERN: &str = r"(?i)^(\d+(?:\.\d+)?)\s*(?:-|–|—|to\b)\s*(\d+(?:\.\d+)?)\s*(.*)$";

/// Leading decimal or integer: "2 cups", "1.5kg", ".5 l"
pub const DECIMAL_PATTERN: &str = r"^(\d+(?:\.\d+)?|\.\d+)\s*(.*)$";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref MIXED_FRACTION_REGEX: Regex =
        Regex::new(MIXED_FRACTION_PATTERN).expect("Mixed fraction pattern should be valid");
    pub static ref SIMPLE_FRACTION_REGEX: Regex =
        Regex::new(SIMPLE_FRACTION_PATTERN).expect("Simple fraction pattern should be valid");
    pub static ref RANGE_REGEX: Regex =
        Regex::new(RANGE_PATTERN).expect("Range pattern should be valid");
    pub static ref DECIMAL_REGEX: Regex =
        Regex::new(DECIMAL_PATTERN).expect("Decimal pattern should be valid");
}

/// Unicode vulgar fractions and their numerator/denominator
pub const UNICODE_FRACTIONS: &[(char, u32, u32)] = &[
    ('½', 1, 2),
    ('⅓', 1, 3),
    ('⅔', 2, 3),
    ('¼', 1, 4),
    ('¾', 3, 4),
    ('⅕', 1, 5),
    ('⅛', 1, 8),
    ('⅜', 3, 8),
    ('⅝', 5, 8),
    ('⅞', 7, 8),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(MIXED_FRACTION_REGEX.is_match("1 1/2 cups"));
        assert!(SIMPLE_FRACTION_REGEX.is_match("3/4 cup"));
        assert!(RANGE_REGEX.is_match("2-3 tbsp"));
        assert!(DECIMAL_REGEX.is_match("500g"));
    }

    #[test]
    fn test_range_requires_second_number() {
        assert!(!RANGE_REGEX.is_match("2 tomatoes"));
        assert!(RANGE_REGEX.is_match("2 to 3 tomatoes"));
    }
}
