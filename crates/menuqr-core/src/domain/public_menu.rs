// ============================================================================
// MenuQR Core - Public Menu Rows
// File: crates/menuqr-core/src/domain/public_menu.rs
// ============================================================================
//
// `get_public_menu` returns one flat row per category/item pair. Every row is
// checked here before it reaches the composer.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use menuqr_shared::constants::{DEFAULT_BUSINESS_NAME, MAX_SPICE_LEVEL};

use super::menu_item::PriceVariation;
use crate::error::DomainError;

/// Wire shape of a joined row. Item columns are null for category-only rows.
#[derive(Debug, Deserialize)]
struct RawPublicRow {
    category_id: Option<Uuid>,
    category_name: Option<String>,
    #[serde(default)]
    category_description: Option<String>,
    category_order: Option<i32>,

    #[serde(default)]
    item_id: Option<Uuid>,
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    item_description: Option<String>,
    #[serde(default)]
    item_price: Option<Decimal>,
    #[serde(default)]
    item_price_variations: Option<Vec<PriceVariation>>,
    #[serde(default)]
    item_image_url: Option<String>,
    #[serde(default)]
    item_is_vegetarian: Option<bool>,
    #[serde(default)]
    item_is_vegan: Option<bool>,
    #[serde(default)]
    item_is_gluten_free: Option<bool>,
    #[serde(default)]
    item_contains_nuts: Option<bool>,
    #[serde(default)]
    item_spice_level: Option<u8>,
    #[serde(default)]
    item_is_available: Option<bool>,
    #[serde(default)]
    item_order: Option<i32>,

    #[serde(default)]
    business_name: Option<String>,
    #[serde(default)]
    business_logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublicCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublicItem {
    pub id: Uuid,
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
}

/// A decoded row of the public menu join
#[derive(Debug, Clone, PartialEq)]
pub enum PublicMenuRow {
    CategoryOnly(PublicCategory),
    CategoryWithItem(PublicCategory, PublicItem),
}

impl PublicMenuRow {
    pub fn category(&self) -> &PublicCategory {
        match self {
            PublicMenuRow::CategoryOnly(category) => category,
            PublicMenuRow::CategoryWithItem(category, _) => category,
        }
    }

    pub fn item(&self) -> Option<&PublicItem> {
        match self {
            PublicMenuRow::CategoryOnly(_) => None,
            PublicMenuRow::CategoryWithItem(_, item) => Some(item),
        }
    }
}

/// Business header carried on every joined row
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BusinessInfo {
    pub name: String,
    pub logo_url: Option<String>,
}

impl Default for BusinessInfo {
    fn default() -> Self {
        Self { name: DEFAULT_BUSINESS_NAME.to_string(), logo_url: None }
    }
}

/// Result of decoding a whole row set
#[derive(Debug, Clone, Default)]
pub struct DecodedPublicMenu {
    pub business: BusinessInfo,
    pub rows: Vec<PublicMenuRow>,
    pub rejected: Vec<DomainError>,
}

fn decode_error(index: usize, reason: impl Into<String>) -> DomainError {
    DomainError::RowDecode { index, reason: reason.into() }
}

fn decode_row(index: usize, value: Value) -> Result<(PublicMenuRow, Option<String>, Option<String>), DomainError> {
    let raw: RawPublicRow =
        serde_json::from_value(value).map_err(|e| decode_error(index, e.to_string()))?;

    let category = match (raw.category_id, raw.category_name, raw.category_order) {
        (Some(id), Some(name), Some(display_order)) => PublicCategory {
            id,
            name,
            description: raw.category_description,
            display_order,
        },
        _ => return Err(decode_error(index, "missing category columns")),
    };

    let row = match (raw.item_id, raw.item_name, raw.item_price) {
        (None, None, None) => PublicMenuRow::CategoryOnly(category),
        (Some(id), Some(name), Some(price)) => {
            let spice_level = raw.item_spice_level.unwrap_or(0);
            if spice_level > MAX_SPICE_LEVEL {
                return Err(decode_error(index, format!("spice level {} out of range", spice_level)));
            }
            PublicMenuRow::CategoryWithItem(
                category,
                PublicItem {
                    id,
                    name,
                    description: raw.item_description,
                    price,
                    price_variations: raw.item_price_variations.filter(|v| !v.is_empty()),
                    image_url: raw.item_image_url,
                    is_vegetarian: raw.item_is_vegetarian.unwrap_or(false),
                    is_vegan: raw.item_is_vegan.unwrap_or(false),
                    is_gluten_free: raw.item_is_gluten_free.unwrap_or(false),
                    contains_nuts: raw.item_contains_nuts.unwrap_or(false),
                    spice_level,
                    is_available: raw.item_is_available.unwrap_or(true),
                    display_order: raw.item_order.unwrap_or(0),
                },
            )
        }
        _ => return Err(decode_error(index, "partial item columns")),
    };

    Ok((row, raw.business_name, raw.business_logo))
}

/// Classifies every row, collecting the malformed ones instead of failing.
pub fn decode_rows(values: Vec<Value>) -> DecodedPublicMenu {
    let mut decoded = DecodedPublicMenu::default();
    let mut header_seen = false;

    for (index, value) in values.into_iter().enumerate() {
        match decode_row(index, value) {
            Ok((row, business_name, business_logo)) => {
                if !header_seen {
                    header_seen = true;
                    decoded.business = BusinessInfo {
                        name: business_name
                            .filter(|n| !n.trim().is_empty())
                            .unwrap_or_else(|| DEFAULT_BUSINESS_NAME.to_string()),
                        logo_url: business_logo.filter(|l| !l.is_empty()),
                    };
                }
                decoded.rows.push(row);
            }
            Err(e) => decoded.rejected.push(e),
        }
    }

    decoded
}
