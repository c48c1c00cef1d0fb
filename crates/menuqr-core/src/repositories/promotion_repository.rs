//! Promotion repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::{Promotion, PromotionItemLink, PromotionRecord};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PromotionRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, session: &Session) -> Result<Vec<Promotion>, DomainError>;
    async fn list_links(&self, session: &Session, promotion_ids: &[Uuid]) -> Result<Vec<PromotionItemLink>, DomainError>;
    async fn create(&self, session: &Session, record: &PromotionRecord) -> Result<Promotion, DomainError>;
    async fn update(&self, session: &Session, id: Uuid, record: &PromotionRecord) -> Result<Promotion, DomainError>;
    async fn set_active(&self, session: &Session, id: Uuid, is_active: bool) -> Result<(), DomainError>;
    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), DomainError>;
    async fn delete_links(&self, session: &Session, promotion_id: Uuid) -> Result<(), DomainError>;
    async fn insert_links(&self, session: &Session, links: &[PromotionItemLink]) -> Result<(), DomainError>;
}
