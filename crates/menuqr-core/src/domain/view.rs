// ============================================================================
// MenuQR Core - Composed Menu View Models
// File: crates/menuqr-core/src/domain/view.rs
// ============================================================================

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::category::Category;
use super::menu_item::{display_price, format_price, DietaryBadge, MenuItem, PriceVariation};
use super::public_menu::{BusinessInfo, PublicCategory, PublicItem};

/// Whether categories without items are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyCategoryPolicy {
    Show,
    Hide,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown empty category policy `{0}`, expected `show` or `hide`")]
pub struct UnknownPolicy(pub String);

impl FromStr for EmptyCategoryPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "show" => Ok(EmptyCategoryPolicy::Show),
            "hide" => Ok(EmptyCategoryPolicy::Hide),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// A price variation ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariationView {
    pub name: String,
    pub price: String,
}

/// One item as rendered under its category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub base_price: Decimal,
    pub display_price: String,
    pub variations: Vec<VariationView>,
    pub badges: Vec<DietaryBadge>,
    pub spice_level: u8,
    pub is_available: bool,
    pub display_order: i32,
}

fn variation_views(variations: Option<&[PriceVariation]>) -> Vec<VariationView> {
    variations
        .unwrap_or_default()
        .iter()
        .map(|v| VariationView { name: v.name.clone(), price: format_price(v.price) })
        .collect()
}

impl From<&MenuItem> for ItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            base_price: item.price,
            display_price: format_price(item.display_price()),
            variations: variation_views(item.price_variations.as_deref()),
            badges: item.badges(),
            spice_level: item.spice_level,
            is_available: item.is_available,
            display_order: item.display_order,
        }
    }
}

impl From<&PublicItem> for ItemView {
    fn from(item: &PublicItem) -> Self {
        let variations = item.price_variations.as_deref();
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            base_price: item.price,
            display_price: format_price(display_price(item.price, variations)),
            variations: variation_views(variations),
            badges: DietaryBadge::collect(
                item.is_vegetarian,
                item.is_vegan,
                item.is_gluten_free,
                item.contains_nuts,
            ),
            spice_level: item.spice_level,
            is_available: item.is_available,
            display_order: item.display_order,
        }
    }
}

/// Category plus its items in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub items: Vec<ItemView>,
}

impl CategoryView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            display_order: category.display_order,
            items: Vec::new(),
        }
    }
}

impl From<&PublicCategory> for CategoryView {
    fn from(category: &PublicCategory) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            display_order: category.display_order,
            items: Vec::new(),
        }
    }
}

/// The diner-facing menu of one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicMenu {
    pub business: BusinessInfo,
    pub categories: Vec<CategoryView>,
}
