// ============================================================================
// MenuQR Core - View-Model Composer
// File: crates/menuqr-core/src/services/composer.rs
// ============================================================================
//! Groups flat category/item collections into the nested, display-ordered
//! structure rendered by the dashboard and the public menu.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{
    decode_rows, Category, CategoryView, EmptyCategoryPolicy, ItemView, MenuItem, PublicMenu, PublicMenuRow,
};

/// Accumulators in first-seen order plus an id index into them.
#[derive(Default)]
struct Accumulator {
    views: Vec<CategoryView>,
    index: HashMap<Uuid, usize>,
}

impl Accumulator {
    fn slot_or_insert_with(&mut self, id: Uuid, seed: impl FnOnce() -> CategoryView) -> usize {
        if let Some(&slot) = self.index.get(&id) {
            return slot;
        }
        let slot = self.views.len();
        self.views.push(seed());
        self.index.insert(id, slot);
        slot
    }

    fn finish(self, policy: EmptyCategoryPolicy) -> Vec<CategoryView> {
        let mut views = self.views;
        // Vec::sort_by_key is stable: ties keep source order.
        views.sort_by_key(|c| c.display_order);
        for view in &mut views {
            view.items.sort_by_key(|i| i.display_order);
        }
        if policy == EmptyCategoryPolicy::Hide {
            views.retain(|c| !c.is_empty());
        }
        views
    }
}

/// Composes the owner's menu from separately fetched categories and items.
///
/// Items whose category is not in `categories` are skipped.
pub fn compose_menu(categories: &[Category], items: &[MenuItem], policy: EmptyCategoryPolicy) -> Vec<CategoryView> {
    let mut acc = Accumulator::default();
    for category in categories {
        acc.slot_or_insert_with(category.id, || CategoryView::from(category));
    }

    for item in items {
        match acc.index.get(&item.category_id) {
            Some(&slot) => acc.views[slot].items.push(ItemView::from(item)),
            None => debug!("Skipping item {} of unknown category {}", item.id, item.category_id),
        }
    }

    acc.finish(policy)
}

/// Composes decoded public rows; category metadata rides along each row.
pub fn compose_public(rows: &[PublicMenuRow], policy: EmptyCategoryPolicy) -> Vec<CategoryView> {
    let mut acc = Accumulator::default();
    for row in rows {
        let category = row.category();
        let slot = acc.slot_or_insert_with(category.id, || CategoryView::from(category));
        if let Some(item) = row.item() {
            acc.views[slot].items.push(ItemView::from(item));
        }
    }
    acc.finish(policy)
}

/// Decodes the raw join result and composes it. Malformed rows are dropped.
pub fn compose_public_menu(values: Vec<Value>, policy: EmptyCategoryPolicy) -> PublicMenu {
    let decoded = decode_rows(values);
    for rejected in &decoded.rejected {
        warn!("Dropping public menu row: {}", rejected);
    }

    PublicMenu {
        business: decoded.business,
        categories: compose_public(&decoded.rows, policy),
    }
}
