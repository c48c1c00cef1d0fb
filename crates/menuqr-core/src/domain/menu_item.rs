// ============================================================================
// MenuQR Core - Menu Item Entity
// File: crates/menuqr-core/src/domain/menu_item.rs
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use menuqr_shared::constants::MAX_SPICE_LEVEL;

use super::ordering::Orderable;
use crate::error::DomainError;

/// Named price option ("Small", "Large") of a single item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceVariation {
    pub name: String,
    pub price: Decimal,
}

/// Dietary badge shown next to an item, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryBadge {
    Vegetarian,
    Vegan,
    GlutenFree,
    ContainsNuts,
}

impl DietaryBadge {
    pub fn label(&self) -> &'static str {
        match self {
            DietaryBadge::Vegetarian => "Vegetarian",
            DietaryBadge::Vegan => "Vegan",
            DietaryBadge::GlutenFree => "Gluten Free",
            DietaryBadge::ContainsNuts => "Contains Nuts",
        }
    }

    pub fn collect(vegetarian: bool, vegan: bool, gluten_free: bool, contains_nuts: bool) -> Vec<Self> {
        [
            (vegetarian, DietaryBadge::Vegetarian),
            (vegan, DietaryBadge::Vegan),
            (gluten_free, DietaryBadge::GlutenFree),
            (contains_nuts, DietaryBadge::ContainsNuts),
        ]
        .into_iter()
        .filter_map(|(set, badge)| set.then_some(badge))
        .collect()
    }
}

/// Price shown on the menu: the cheapest variation when any exist, else the
/// base price.
pub fn display_price(base: Decimal, variations: Option<&[PriceVariation]>) -> Decimal {
    variations
        .and_then(|vs| vs.iter().map(|v| v.price).min())
        .unwrap_or(base)
}

/// Two-decimal rendering used everywhere a price is displayed.
pub fn format_price(price: Decimal) -> String {
    let mut rounded = price.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub price_variations: Option<Vec<PriceVariation>>,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub contains_nuts: bool,
    pub spice_level: u8,
    pub is_available: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn display_price(&self) -> Decimal {
        display_price(self.price, self.price_variations.as_deref())
    }

    pub fn badges(&self) -> Vec<DietaryBadge> {
        DietaryBadge::collect(self.is_vegetarian, self.is_vegan, self.is_gluten_free, self.contains_nuts)
    }
}

impl Orderable for MenuItem {
    fn id(&self) -> Uuid {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }
}

fn default_available() -> bool {
    true
}

/// Owner input from the item form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub category_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    /// `Some` means the item is priced by variation and must list at least one.
    #[serde(default)]
    pub price_variations: Option<Vec<PriceVariation>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    #[serde(default)]
    pub contains_nuts: bool,
    #[serde(default)]
    pub spice_level: u8,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl MenuItemDraft {
    /// Validates the form and produces the persisted field set.
    pub fn into_record(self) -> Result<MenuItemRecord, DomainError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::ValidationError("Menu item name is required".into()));
        }
        if self.spice_level > MAX_SPICE_LEVEL {
            return Err(DomainError::ValidationError(format!(
                "Spice level must be between 0 and {}",
                MAX_SPICE_LEVEL
            )));
        }

        let (price, price_variations) = match self.price_variations {
            Some(variations) => {
                if variations.is_empty() {
                    return Err(DomainError::ValidationError(
                        "Please add at least one price variation".into(),
                    ));
                }
                let mut cleaned = Vec::with_capacity(variations.len());
                for variation in variations {
                    let variation_name = variation.name.trim().to_string();
                    if variation_name.is_empty() {
                        return Err(DomainError::ValidationError("Variation name is required".into()));
                    }
                    if variation.price.is_sign_negative() {
                        return Err(DomainError::ValidationError("Please enter a valid price".into()));
                    }
                    cleaned.push(PriceVariation { name: variation_name, price: variation.price });
                }
                (cleaned[0].price, Some(cleaned))
            }
            None => match self.price {
                Some(price) if !price.is_sign_negative() => (price, None),
                _ => return Err(DomainError::ValidationError("Please enter a valid price".into())),
            },
        };

        Ok(MenuItemRecord {
            category_id: self.category_id,
            name,
            description: self.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
            price,
            price_variations,
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
            is_vegetarian: self.is_vegetarian,
            is_vegan: self.is_vegan,
            is_gluten_free: self.is_gluten_free,
            contains_nuts: self.contains_nuts,
            spice_level: self.spice_level,
            is_available: self.is_available,
        })
    }
}

/// Editable columns of a menu item, used for both insert and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemRecord {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub price_variations: Option<Vec<PriceVariation>>,
    pub image_url: Option<String>,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub contains_nuts: bool,
    pub spice_level: u8,
    pub is_available: bool,
}

/// Insert payload: the record plus its initial position
#[derive(Debug, Clone, Serialize)]
pub struct NewMenuItem {
    #[serde(flatten)]
    pub record: MenuItemRecord,
    pub display_order: i32,
}
