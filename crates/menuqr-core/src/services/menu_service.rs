// ============================================================================
// MenuQR Core - Menu Service
// File: crates/menuqr-core/src/services/menu_service.rs
// ============================================================================
//! Facade over [`MenuRepository`] used by every menu screen.
//!
//! Backend failures never cross this boundary: they are logged and turned
//! into an empty list, `None` or `false`. Input that fails validation is
//! returned as `Err` before any request is made.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::{
    Category, CategoryDraft, CategoryView, EmptyCategoryPolicy, MenuItem, MenuItemDraft, NewCategory, NewMenuItem,
    OrderUpdate, PublicMenu,
};
use crate::error::DomainError;
use crate::repositories::MenuRepository;
use crate::services::composer::{compose_menu, compose_public_menu};

fn next_display_order<T>(siblings: &[T], order: impl Fn(&T) -> i32) -> i32 {
    siblings.iter().map(order).max().map_or(0, |max| max + 1)
}

fn check_order_updates(updates: &[OrderUpdate]) -> Result<(), DomainError> {
    if updates.is_empty() {
        return Err(DomainError::EmptyReorderTarget);
    }
    let mut seen = HashSet::with_capacity(updates.len());
    for update in updates {
        if !seen.insert(update.id) {
            return Err(DomainError::ValidationError(format!("Duplicate id {} in reorder", update.id)));
        }
    }
    // Orders must be a permutation of 0..n-1.
    let mut orders: Vec<i32> = updates.iter().map(|u| u.display_order).collect();
    orders.sort_unstable();
    let dense = orders.iter().enumerate().all(|(index, order)| i32::try_from(index) == Ok(*order));
    if !dense {
        return Err(DomainError::ValidationError(
            "Display orders must be unique and run from 0 without gaps".into(),
        ));
    }
    Ok(())
}

pub struct MenuService<R: MenuRepository + ?Sized = dyn MenuRepository> {
    repo: Arc<R>,
    public_policy: EmptyCategoryPolicy,
}

impl<R: MenuRepository + ?Sized> MenuService<R> {
    pub fn new(repo: Arc<R>, public_policy: EmptyCategoryPolicy) -> Self {
        Self { repo, public_policy }
    }

    pub async fn list_categories(&self, session: &Session) -> Vec<Category> {
        self.repo.list_categories(session).await.unwrap_or_else(|e| {
            error!("Error fetching categories: {}", e);
            Vec::new()
        })
    }

    /// New categories go to the end of the list.
    pub async fn create_category(&self, session: &Session, draft: CategoryDraft) -> Result<Option<Category>, DomainError> {
        let draft = draft.normalized()?;

        let existing = match self.repo.list_categories(session).await {
            Ok(categories) => categories,
            Err(e) => {
                error!("Error creating category: {}", e);
                return Ok(None);
            }
        };
        let category = NewCategory {
            profile_id: session.profile_id,
            name: draft.name,
            description: draft.description,
            display_order: next_display_order(&existing, |c| c.display_order),
        };

        match self.repo.create_category(session, &category).await {
            Ok(created) => {
                info!("Category created: {}", created.id);
                Ok(Some(created))
            }
            Err(e) => {
                error!("Error creating category: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn update_category(
        &self,
        session: &Session,
        id: Uuid,
        draft: CategoryDraft,
    ) -> Result<Option<Category>, DomainError> {
        let draft = draft.normalized()?;
        Ok(self
            .repo
            .update_category(session, id, &draft)
            .await
            .map_err(|e| error!("Error updating category {}: {}", id, e))
            .ok())
    }

    pub async fn delete_category(&self, session: &Session, id: Uuid) -> bool {
        match self.repo.delete_category(session, id).await {
            Ok(()) => {
                info!("Category deleted: {}", id);
                true
            }
            Err(e) => {
                error!("Error deleting category {}: {}", id, e);
                false
            }
        }
    }

    pub async fn list_items(&self, session: &Session, category_id: Uuid) -> Vec<MenuItem> {
        self.repo.list_items(session, category_id).await.unwrap_or_else(|e| {
            error!("Error fetching menu items: {}", e);
            Vec::new()
        })
    }

    pub async fn create_item(&self, session: &Session, draft: MenuItemDraft) -> Result<Option<MenuItem>, DomainError> {
        let record = draft.into_record()?;

        let siblings = match self.repo.list_items(session, record.category_id).await {
            Ok(items) => items,
            Err(e) => {
                error!("Error creating menu item: {}", e);
                return Ok(None);
            }
        };
        let item = NewMenuItem { display_order: next_display_order(&siblings, |i| i.display_order), record };

        match self.repo.create_item(session, &item).await {
            Ok(created) => {
                info!("Menu item created: {}", created.id);
                Ok(Some(created))
            }
            Err(e) => {
                error!("Error creating menu item: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn update_item(
        &self,
        session: &Session,
        id: Uuid,
        draft: MenuItemDraft,
    ) -> Result<Option<MenuItem>, DomainError> {
        let record = draft.into_record()?;
        Ok(self
            .repo
            .update_item(session, id, &record)
            .await
            .map_err(|e| error!("Error updating menu item {}: {}", id, e))
            .ok())
    }

    pub async fn delete_item(&self, session: &Session, id: Uuid) -> bool {
        match self.repo.delete_item(session, id).await {
            Ok(()) => {
                info!("Menu item deleted: {}", id);
                true
            }
            Err(e) => {
                error!("Error deleting menu item {}: {}", id, e);
                false
            }
        }
    }

    pub async fn reorder_categories(&self, session: &Session, updates: &[OrderUpdate]) -> Result<bool, DomainError> {
        check_order_updates(updates)?;
        Ok(match self.repo.reorder_categories(session, updates).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error updating category order: {}", e);
                false
            }
        })
    }

    pub async fn reorder_items(&self, session: &Session, updates: &[OrderUpdate]) -> Result<bool, DomainError> {
        check_order_updates(updates)?;
        Ok(match self.repo.reorder_items(session, updates).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error updating menu item order: {}", e);
                false
            }
        })
    }

    pub async fn public_menu_rows(&self, profile_id: Uuid) -> Vec<Value> {
        self.repo.public_menu_rows(profile_id).await.unwrap_or_else(|e| {
            error!("Error fetching public menu: {}", e);
            Vec::new()
        })
    }

    /// The owner's menu: every category, empty ones included.
    pub async fn dashboard_menu(&self, session: &Session) -> Vec<CategoryView> {
        let categories = self.list_categories(session).await;
        if categories.is_empty() {
            return Vec::new();
        }
        let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
        let items = self.repo.list_items_in(session, &ids).await.unwrap_or_else(|e| {
            error!("Error fetching menu items: {}", e);
            Vec::new()
        });
        compose_menu(&categories, &items, EmptyCategoryPolicy::Show)
    }

    pub async fn public_menu(&self, profile_id: Uuid) -> PublicMenu {
        let rows = self.public_menu_rows(profile_id).await;
        compose_public_menu(rows, self.public_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMenuRepository;
    use crate::services::test_support::session;
    use chrono::Utc;
    use mockall::predicate::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn category(profile_id: Uuid, order: i32) -> Category {
        Category {
            id: Uuid::new_v4(),
            profile_id,
            name: format!("Category {}", order),
            description: None,
            display_order: order,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn backend_down() -> DomainError {
        DomainError::BackendError("connection refused".into())
    }

    #[tokio::test]
    async fn test_list_failure_is_empty() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_categories().returning(|_| Err(backend_down()));
        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);
        assert!(service.list_categories(&session()).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_category_appends_and_stamps_profile() {
        let session = session();
        let profile_id = session.profile_id;
        let existing = vec![category(profile_id, 0), category(profile_id, 1)];

        let mut repo = MockMenuRepository::new();
        repo.expect_list_categories().returning(move |_| Ok(existing.clone()));
        repo.expect_create_category()
            .withf(move |_, new| new.profile_id == profile_id && new.display_order == 2 && new.name == "Desserts")
            .times(1)
            .returning(|_, new| {
                let mut created = category(new.profile_id, new.display_order);
                created.name = new.name.clone();
                Ok(created)
            });

        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);
        let draft = CategoryDraft { name: " Desserts ".into(), description: None };
        let created = service.create_category(&session, draft).await.unwrap().unwrap();
        assert_eq!(created.display_order, 2);
    }

    #[tokio::test]
    async fn test_validation_precedes_network() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_categories().never();
        repo.expect_create_category().never();
        repo.expect_create_item().never();

        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);
        let err = service
            .create_category(&session(), CategoryDraft { name: "   ".into(), description: None })
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let draft = MenuItemDraft {
            category_id: Uuid::new_v4(),
            name: "Soup".into(),
            description: None,
            price: None,
            price_variations: None,
            image_url: None,
            is_vegetarian: false,
            is_vegan: false,
            is_gluten_free: false,
            contains_nuts: false,
            spice_level: 0,
            is_available: true,
        };
        assert!(service.create_item(&session(), draft).await.is_err());

        let err = service.reorder_categories(&session(), &[]).await.unwrap_err();
        assert_eq!(err, DomainError::EmptyReorderTarget);
    }

    #[tokio::test]
    async fn test_write_failures_become_sentinels() {
        let mut repo = MockMenuRepository::new();
        repo.expect_update_category().returning(|_, _, _| Err(backend_down()));
        repo.expect_delete_item().returning(|_, _| Err(backend_down()));
        repo.expect_reorder_items().returning(|_, _| Err(backend_down()));

        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);
        let updated = service
            .update_category(&session(), Uuid::new_v4(), CategoryDraft { name: "Mains".into(), description: None })
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!service.delete_item(&session(), Uuid::new_v4()).await);

        let updates = [OrderUpdate { id: Uuid::new_v4(), display_order: 0 }];
        assert!(!service.reorder_items(&session(), &updates).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_reorder_ids_rejected() {
        let repo = MockMenuRepository::new();
        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);
        let id = Uuid::new_v4();
        let updates = [OrderUpdate { id, display_order: 0 }, OrderUpdate { id, display_order: 1 }];
        assert!(service.reorder_categories(&session(), &updates).await.is_err());
    }

    #[tokio::test]
    async fn test_bulk_order_must_be_dense() {
        let mut repo = MockMenuRepository::new();
        repo.expect_reorder_categories().never();
        repo.expect_reorder_items().never();
        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);

        let orders = |orders: &[i32]| -> Vec<OrderUpdate> {
            orders.iter().map(|&display_order| OrderUpdate { id: Uuid::new_v4(), display_order }).collect()
        };

        let duplicated = service.reorder_categories(&session(), &orders(&[7, 7, -3])).await.unwrap_err();
        assert!(duplicated.is_validation());

        let gap = service.reorder_items(&session(), &orders(&[0, 2])).await.unwrap_err();
        assert!(gap.is_validation());

        let shifted = service.reorder_items(&session(), &orders(&[1, 2, 3])).await.unwrap_err();
        assert!(shifted.is_validation());
    }

    #[tokio::test]
    async fn test_bulk_order_accepts_any_permutation() {
        let mut repo = MockMenuRepository::new();
        repo.expect_reorder_categories()
            .withf(|_, updates| updates.len() == 3)
            .times(1)
            .returning(|_, _| Ok(()));
        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);

        let updates: Vec<OrderUpdate> =
            [2, 0, 1].iter().map(|&display_order| OrderUpdate { id: Uuid::new_v4(), display_order }).collect();
        assert!(service.reorder_categories(&session(), &updates).await.unwrap());
    }

    #[tokio::test]
    async fn test_dashboard_menu_shows_empty_categories() {
        let session = session();
        let mains = category(session.profile_id, 0);
        let specials = category(session.profile_id, 1);
        let mains_id = mains.id;
        let categories = vec![specials.clone(), mains.clone()];

        let mut repo = MockMenuRepository::new();
        repo.expect_list_categories().returning(move |_| Ok(categories.clone()));
        repo.expect_list_items_in()
            .withf(|_, ids| ids.len() == 2)
            .returning(move |_, _| {
                Ok(vec![MenuItem {
                    id: Uuid::new_v4(),
                    category_id: mains_id,
                    name: "Burger".into(),
                    description: None,
                    price: Decimal::new(1299, 2),
                    price_variations: None,
                    image_url: None,
                    is_vegetarian: false,
                    is_vegan: false,
                    is_gluten_free: false,
                    contains_nuts: false,
                    spice_level: 0,
                    is_available: true,
                    display_order: 0,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }])
            });

        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Hide);
        let menu = service.dashboard_menu(&session).await;
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].id, mains_id);
        assert_eq!(menu[0].items[0].display_price, "12.99");
        assert!(menu[1].items.is_empty());
    }

    #[tokio::test]
    async fn test_public_menu_uses_configured_policy() {
        let profile_id = Uuid::new_v4();
        let rows = vec![
            json!({
                "category_id": Uuid::new_v4(),
                "category_name": "Mains",
                "category_order": 0,
                "item_id": Uuid::new_v4(),
                "item_name": "Burger",
                "item_price": 9.5,
                "item_order": 0
            }),
            json!({
                "category_id": Uuid::new_v4(),
                "category_name": "Empty",
                "category_order": 1
            }),
        ];
        let shown_rows = rows.clone();

        let mut hiding = MockMenuRepository::new();
        hiding
            .expect_public_menu_rows()
            .with(eq(profile_id))
            .returning(move |_| Ok(rows.clone()));
        let hidden = MenuService::new(Arc::new(hiding), EmptyCategoryPolicy::Hide).public_menu(profile_id).await;
        assert_eq!(hidden.categories.len(), 1);
        assert_eq!(hidden.business.name, "Restaurant Menu");

        let mut showing = MockMenuRepository::new();
        showing.expect_public_menu_rows().returning(move |_| Ok(shown_rows.clone()));
        let shown = MenuService::new(Arc::new(showing), EmptyCategoryPolicy::Show).public_menu(profile_id).await;
        assert_eq!(shown.categories.len(), 2);
    }

    #[tokio::test]
    async fn test_public_menu_outage_is_empty() {
        let mut repo = MockMenuRepository::new();
        repo.expect_public_menu_rows().returning(|_| Err(backend_down()));
        let service = MenuService::new(Arc::new(repo), EmptyCategoryPolicy::Show);
        assert!(service.public_menu(Uuid::new_v4()).await.categories.is_empty());
    }
}
