// ============================================================================
// MenuQR Infrastructure - Promotion Repository
// File: crates/menuqr-infrastructure/src/backend/rest/promotion_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use menuqr_core::domain::{Promotion, PromotionItemLink, PromotionRecord};
use menuqr_core::error::DomainError;
use menuqr_core::repositories::{PromotionRepository, Session};

use super::log_err;
use crate::backend::client::{eq, in_list, Auth, BackendClient};

const PROMOTIONS: &str = "promotions";
const PROMOTION_ITEMS: &str = "promotion_menu_items";

#[derive(Serialize)]
struct NewPromotionRow<'a> {
    profile_id: Uuid,
    #[serde(flatten)]
    record: &'a PromotionRecord,
}

pub struct RestPromotionRepository {
    client: BackendClient,
}

impl RestPromotionRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PromotionRepository for RestPromotionRepository {
    async fn list(&self, session: &Session) -> Result<Vec<Promotion>, DomainError> {
        self.client
            .select(
                Auth::Session(session),
                PROMOTIONS,
                vec![
                    ("profile_id", eq(session.profile_id)),
                    ("order", "start_date.desc".into()),
                ],
            )
            .await
            .map_err(log_err("listing promotions"))
    }

    async fn list_links(&self, session: &Session, promotion_ids: &[Uuid]) -> Result<Vec<PromotionItemLink>, DomainError> {
        if promotion_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.client
            .select(
                Auth::Session(session),
                PROMOTION_ITEMS,
                vec![
                    ("select", "promotion_id,menu_item_id".into()),
                    ("promotion_id", in_list(promotion_ids)),
                ],
            )
            .await
            .map_err(log_err("listing promotion items"))
    }

    async fn create(&self, session: &Session, record: &PromotionRecord) -> Result<Promotion, DomainError> {
        info!("Creating promotion: {}", record.title);
        let row = NewPromotionRow { profile_id: session.profile_id, record };
        self.client
            .insert(Auth::Session(session), PROMOTIONS, &row)
            .await
            .map_err(log_err("creating promotion"))
    }

    async fn update(&self, session: &Session, id: Uuid, record: &PromotionRecord) -> Result<Promotion, DomainError> {
        self.client
            .update(Auth::Session(session), PROMOTIONS, vec![("id", eq(id))], record)
            .await
            .map_err(log_err("updating promotion"))
    }

    async fn set_active(&self, session: &Session, id: Uuid, is_active: bool) -> Result<(), DomainError> {
        self.client
            .update_silent(
                Auth::Session(session),
                PROMOTIONS,
                vec![("id", eq(id))],
                &json!({ "is_active": is_active }),
            )
            .await
            .map_err(log_err("toggling promotion"))
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting promotion: {}", id);
        self.client
            .delete(Auth::Session(session), PROMOTIONS, vec![("id", eq(id))])
            .await
            .map_err(log_err("deleting promotion"))
    }

    async fn delete_links(&self, session: &Session, promotion_id: Uuid) -> Result<(), DomainError> {
        self.client
            .delete(Auth::Session(session), PROMOTION_ITEMS, vec![("promotion_id", eq(promotion_id))])
            .await
            .map_err(log_err("clearing promotion items"))
    }

    async fn insert_links(&self, session: &Session, links: &[PromotionItemLink]) -> Result<(), DomainError> {
        if links.is_empty() {
            return Ok(());
        }
        self.client
            .insert_silent(Auth::Session(session), PROMOTION_ITEMS, links)
            .await
            .map_err(log_err("linking promotion items"))
    }
}
