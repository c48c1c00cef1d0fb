// ============================================================================
// MenuQR Core - Public Menu Renderer
// File: crates/menuqr-core/src/services/renderer.rs
// ============================================================================
//! Diner-facing presentation state over a composed [`PublicMenu`]: the
//! selected category tab and the open item detail.

use serde::Serialize;
use uuid::Uuid;

use menuqr_shared::constants::MAX_SPICE_LEVEL;

use crate::domain::{BusinessInfo, CategoryView, DietaryBadge, ItemView, PublicMenu, VariationView};

const SPICE_SLOTS: usize = MAX_SPICE_LEVEL as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    /// Nothing to show: the "no menu" screen.
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PriceDisplay {
    Single(String),
    Variations(Vec<VariationView>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeView {
    pub badge: DietaryBadge,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub badges: Vec<BadgeView>,
    pub spice_indicator: [bool; SPICE_SLOTS],
    pub price: PriceDisplay,
    pub is_available: bool,
}

/// Slot `i` is lit when `i < spice_level`.
pub fn spice_indicator(spice_level: u8) -> [bool; SPICE_SLOTS] {
    let mut slots = [false; SPICE_SLOTS];
    for (i, slot) in slots.iter_mut().enumerate() {
        *slot = i < usize::from(spice_level);
    }
    slots
}

impl From<&ItemView> for ItemDetail {
    fn from(item: &ItemView) -> Self {
        let price = if item.variations.is_empty() {
            PriceDisplay::Single(item.display_price.clone())
        } else {
            PriceDisplay::Variations(item.variations.clone())
        };
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            badges: item.badges.iter().map(|&badge| BadgeView { badge, label: badge.label() }).collect(),
            spice_indicator: spice_indicator(item.spice_level),
            price,
            is_available: item.is_available,
        }
    }
}

/// Serializable snapshot of what the diner currently sees
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMenu {
    pub state: MenuState,
    pub business: BusinessInfo,
    pub categories: Vec<CategoryView>,
    pub selected_category: Option<Uuid>,
    pub item_detail: Option<ItemDetail>,
}

#[derive(Debug, Clone)]
pub struct PublicMenuRenderer {
    menu: PublicMenu,
    selected_category: Option<Uuid>,
    selected_item: Option<Uuid>,
}

impl PublicMenuRenderer {
    pub fn new(menu: PublicMenu) -> Self {
        let selected_category = menu.categories.first().map(|c| c.id);
        Self { menu, selected_category, selected_item: None }
    }

    pub fn state(&self) -> MenuState {
        if self.menu.categories.is_empty() {
            MenuState::Empty
        } else {
            MenuState::Ready
        }
    }

    pub fn business(&self) -> &BusinessInfo {
        &self.menu.business
    }

    pub fn categories(&self) -> &[CategoryView] {
        &self.menu.categories
    }

    pub fn selected_category(&self) -> Option<&CategoryView> {
        let id = self.selected_category?;
        self.menu.categories.iter().find(|c| c.id == id)
    }

    /// Switches tabs; unknown ids leave the selection unchanged.
    pub fn select_category(&mut self, id: Uuid) -> bool {
        if self.menu.categories.iter().any(|c| c.id == id) {
            self.selected_category = Some(id);
            true
        } else {
            false
        }
    }

    fn find_item(&self, id: Uuid) -> Option<&ItemView> {
        self.menu.categories.iter().flat_map(|c| c.items.iter()).find(|i| i.id == id)
    }

    pub fn select_item(&mut self, id: Uuid) -> Option<ItemDetail> {
        let detail = self.find_item(id).map(ItemDetail::from)?;
        self.selected_item = Some(id);
        Some(detail)
    }

    pub fn close_item(&mut self) {
        self.selected_item = None;
    }

    pub fn item_detail(&self) -> Option<ItemDetail> {
        self.selected_item.and_then(|id| self.find_item(id)).map(ItemDetail::from)
    }

    pub fn render(&self) -> RenderedMenu {
        RenderedMenu {
            state: self.state(),
            business: self.menu.business.clone(),
            categories: self.menu.categories.clone(),
            selected_category: self.selected_category,
            item_detail: self.item_detail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(name: &str, spice_level: u8, variations: Vec<VariationView>) -> ItemView {
        ItemView {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: Some("House special".into()),
            image_url: None,
            base_price: Decimal::new(1299, 2),
            display_price: "12.99".into(),
            variations,
            badges: vec![DietaryBadge::Vegan, DietaryBadge::GlutenFree],
            spice_level,
            is_available: true,
            display_order: 0,
        }
    }

    fn category(name: &str, items: Vec<ItemView>) -> CategoryView {
        CategoryView { id: Uuid::new_v4(), name: name.into(), description: None, display_order: 0, items }
    }

    fn menu(categories: Vec<CategoryView>) -> PublicMenu {
        PublicMenu { business: BusinessInfo::default(), categories }
    }

    #[test]
    fn test_empty_state() {
        let renderer = PublicMenuRenderer::new(menu(vec![]));
        assert_eq!(renderer.state(), MenuState::Empty);
        assert!(renderer.selected_category().is_none());
        assert_eq!(renderer.render().business.name, "Restaurant Menu");
    }

    #[test]
    fn test_defaults_to_first_category_and_ignores_unknown() {
        let starters = category("Starters", vec![]);
        let mains = category("Mains", vec![]);
        let mains_id = mains.id;
        let mut renderer = PublicMenuRenderer::new(menu(vec![starters, mains]));

        assert_eq!(renderer.state(), MenuState::Ready);
        assert_eq!(renderer.selected_category().unwrap().name, "Starters");
        assert!(!renderer.select_category(Uuid::new_v4()));
        assert_eq!(renderer.selected_category().unwrap().name, "Starters");
        assert!(renderer.select_category(mains_id));
        assert_eq!(renderer.render().selected_category, Some(mains_id));
    }

    #[test]
    fn test_spice_indicator() {
        assert_eq!(spice_indicator(0), [false; 5]);
        assert_eq!(spice_indicator(3), [true, true, true, false, false]);
        assert_eq!(spice_indicator(5), [true; 5]);
    }

    #[test]
    fn test_item_detail_single_and_variations() {
        let single = item("Pasta", 2, vec![]);
        let varied = item(
            "Pizza",
            0,
            vec![
                VariationView { name: "Small".into(), price: "8.00".into() },
                VariationView { name: "Large".into(), price: "11.00".into() },
            ],
        );
        let (single_id, varied_id) = (single.id, varied.id);
        let mut renderer = PublicMenuRenderer::new(menu(vec![category("Mains", vec![single, varied])]));

        let detail = renderer.select_item(single_id).unwrap();
        assert_eq!(detail.price, PriceDisplay::Single("12.99".into()));
        assert_eq!(detail.spice_indicator, [true, true, false, false, false]);
        assert_eq!(detail.badges[0].label, "Vegan");
        assert_eq!(detail.badges[1].label, "Gluten Free");

        let detail = renderer.select_item(varied_id).unwrap();
        assert!(matches!(detail.price, PriceDisplay::Variations(ref v) if v.len() == 2));
        assert_eq!(renderer.item_detail().unwrap().id, varied_id);

        renderer.close_item();
        assert!(renderer.item_detail().is_none());
        assert!(renderer.select_item(Uuid::new_v4()).is_none());
    }
}
