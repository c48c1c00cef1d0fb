//! Diner-facing lookup tables: ratings and languages

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Language, MenuItemRating, NewRating};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Newest first.
    async fn list_for_item(&self, menu_item_id: Uuid) -> Result<Vec<MenuItemRating>, DomainError>;
    async fn insert(&self, rating: &NewRating) -> Result<(), DomainError>;
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// Active languages ordered by name.
    async fn list_active(&self) -> Result<Vec<Language>, DomainError>;
}
