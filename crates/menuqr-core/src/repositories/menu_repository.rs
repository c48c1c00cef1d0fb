//! Category and menu item repository trait (port)

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::{Category, CategoryDraft, MenuItem, MenuItemRecord, NewCategory, NewMenuItem, OrderUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Categories of the session's profile, ordered by display order.
    async fn list_categories(&self, session: &Session) -> Result<Vec<Category>, DomainError>;
    async fn create_category(&self, session: &Session, category: &NewCategory) -> Result<Category, DomainError>;
    async fn update_category(&self, session: &Session, id: Uuid, draft: &CategoryDraft) -> Result<Category, DomainError>;
    async fn delete_category(&self, session: &Session, id: Uuid) -> Result<(), DomainError>;

    /// Items of one category, ordered by display order.
    async fn list_items(&self, session: &Session, category_id: Uuid) -> Result<Vec<MenuItem>, DomainError>;
    /// Items of several categories in a single call.
    async fn list_items_in(&self, session: &Session, category_ids: &[Uuid]) -> Result<Vec<MenuItem>, DomainError>;
    async fn create_item(&self, session: &Session, item: &NewMenuItem) -> Result<MenuItem, DomainError>;
    async fn update_item(&self, session: &Session, id: Uuid, record: &MenuItemRecord) -> Result<MenuItem, DomainError>;
    async fn delete_item(&self, session: &Session, id: Uuid) -> Result<(), DomainError>;

    /// Bulk display-order update, applied by the backend in one transaction.
    async fn reorder_categories(&self, session: &Session, updates: &[OrderUpdate]) -> Result<(), DomainError>;
    async fn reorder_items(&self, session: &Session, updates: &[OrderUpdate]) -> Result<(), DomainError>;

    /// Raw joined rows of a profile's public menu. No session required.
    async fn public_menu_rows(&self, profile_id: Uuid) -> Result<Vec<Value>, DomainError>;
}
