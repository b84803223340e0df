//! # Inventory Data Model
//!
//! Items the user holds. The inventory store owns these; matching and
//! recommendation code only ever borrows them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage category of an inventory item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryCategory {
    #[serde(alias = "produce")]
    Produce,
    #[serde(alias = "dairy")]
    Dairy,
    #[serde(alias = "meat")]
    Meat,
    #[serde(alias = "seafood")]
    Seafood,
    #[serde(alias = "frozen")]
    Frozen,
    #[serde(alias = "pantry")]
    Pantry,
    #[serde(alias = "bakery")]
    Bakery,
    #[serde(alias = "beverages")]
    Beverages,
    #[default]
    #[serde(alias = "other")]
    Other,
}

/// A single item in the user's inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: InventoryCategory,
    /// Calendar date the item expires, ISO `YYYY-MM-DD`
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl InventoryItem {
    /// Create an item with a quantity and unit
    pub fn new(id: &str, name: &str, quantity: f64, unit: &str, category: InventoryCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            category,
            expiry_date: None,
        }
    }

    /// Set the expiry date
    pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Days from `today` until expiry; negative once expired
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date
            .map(|expiry| expiry.signed_duration_since(today).num_days())
    }

    /// Whether the item expired before `today`
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.days_until_expiry(today).is_some_and(|days| days < 0)
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.quantity, self.unit)
    }
}

/// Items expiring within `days` of `today` (expired items included),
/// soonest first
pub fn expiring_within(
    inventory: &[InventoryItem],
    today: NaiveDate,
    days: i64,
) -> Vec<&InventoryItem> {
    let mut expiring: Vec<&InventoryItem> = inventory
        .iter()
        .filter(|item| item.days_until_expiry(today).is_some_and(|d| d <= days))
        .collect();
    expiring.sort_by_key(|item| item.expiry_date);
    expiring
}
