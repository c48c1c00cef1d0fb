// ============================================================================
// MenuQR Core - Promotion Service
// File: crates/menuqr-core/src/services/promotion_service.rs
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::{Promotion, PromotionDraft, PromotionItemLink, PromotionStatus, PromotionWithItems};
use crate::error::DomainError;
use crate::repositories::PromotionRepository;

pub struct PromotionService<R: PromotionRepository + ?Sized = dyn PromotionRepository> {
    repo: Arc<R>,
}

impl<R: PromotionRepository + ?Sized> PromotionService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, session: &Session) -> Vec<PromotionWithItems> {
        self.list_at(session, Utc::now()).await
    }

    /// Promotions newest first, each with its linked items and status at `now`.
    pub async fn list_at(&self, session: &Session, now: DateTime<Utc>) -> Vec<PromotionWithItems> {
        match self.load(session).await {
            Ok((promotions, links)) => attach(promotions, links, now),
            Err(e) => {
                error!("Error fetching promotions: {}", e);
                Vec::new()
            }
        }
    }

    async fn load(&self, session: &Session) -> Result<(Vec<Promotion>, Vec<PromotionItemLink>), DomainError> {
        let promotions = self.repo.list(session).await?;
        if promotions.is_empty() {
            return Ok((promotions, Vec::new()));
        }
        let ids: Vec<Uuid> = promotions.iter().map(|p| p.id).collect();
        let links = self.repo.list_links(session, &ids).await?;
        Ok((promotions, links))
    }

    /// Creates the promotion, or updates it and replaces its item links.
    pub async fn save(
        &self,
        session: &Session,
        id: Option<Uuid>,
        draft: PromotionDraft,
    ) -> Result<Option<PromotionWithItems>, DomainError> {
        let (record, item_ids) = draft.into_record()?;

        let saved = async {
            let promotion = match id {
                Some(id) => {
                    let updated = self.repo.update(session, id, &record).await?;
                    self.repo.delete_links(session, id).await?;
                    updated
                }
                None => self.repo.create(session, &record).await?,
            };
            let links: Vec<PromotionItemLink> = item_ids
                .iter()
                .map(|&menu_item_id| PromotionItemLink { promotion_id: promotion.id, menu_item_id })
                .collect();
            self.repo.insert_links(session, &links).await?;
            Ok::<_, DomainError>(promotion)
        }
        .await;

        match saved {
            Ok(promotion) => {
                info!("Promotion saved: {}", promotion.id);
                let status = promotion.status_at(Utc::now());
                Ok(Some(PromotionWithItems { promotion, menu_item_ids: item_ids, status }))
            }
            Err(e) => {
                error!("Error saving promotion: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn set_active(&self, session: &Session, id: Uuid, is_active: bool) -> Result<bool, DomainError> {
        self.set_active_at(session, id, is_active, Utc::now()).await
    }

    /// Expired promotions keep their flag; only running or upcoming ones toggle.
    pub async fn set_active_at(
        &self,
        session: &Session,
        id: Uuid,
        is_active: bool,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let promotions = match self.repo.list(session).await {
            Ok(promotions) => promotions,
            Err(e) => {
                error!("Error toggling promotion {}: {}", id, e);
                return Ok(false);
            }
        };
        let promotion = promotions
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Promotion {}", id)))?;
        if promotion.status_at(now) == PromotionStatus::Expired {
            return Err(DomainError::ValidationError("Expired promotions cannot be toggled".into()));
        }

        Ok(match self.repo.set_active(session, id, is_active).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error toggling promotion {}: {}", id, e);
                false
            }
        })
    }

    pub async fn delete(&self, session: &Session, id: Uuid) -> bool {
        match self.repo.delete(session, id).await {
            Ok(()) => {
                info!("Promotion deleted: {}", id);
                true
            }
            Err(e) => {
                error!("Error deleting promotion {}: {}", id, e);
                false
            }
        }
    }
}

fn attach(promotions: Vec<Promotion>, links: Vec<PromotionItemLink>, now: DateTime<Utc>) -> Vec<PromotionWithItems> {
    let mut by_promotion: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        by_promotion.entry(link.promotion_id).or_default().push(link.menu_item_id);
    }
    promotions
        .into_iter()
        .map(|promotion| PromotionWithItems {
            menu_item_ids: by_promotion.remove(&promotion.id).unwrap_or_default(),
            status: promotion.status_at(now),
            promotion,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiscountType, PromotionRecord};
    use crate::repositories::MockPromotionRepository;
    use crate::services::test_support::session;
    use chrono::Duration;
    use mockall::predicate::*;
    use mockall::Sequence;
    use rust_decimal::Decimal;

    fn promotion(record: &PromotionRecord) -> Promotion {
        Promotion {
            id: Uuid::new_v4(),
            profile_id: Uuid::nil(),
            title: record.title.clone(),
            description: record.description.clone(),
            discount_type: record.discount_type,
            discount_value: record.discount_value,
            start_date: record.start_date,
            end_date: record.end_date,
            banner_image_url: None,
            is_active: record.is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(items: Vec<Uuid>) -> PromotionDraft {
        PromotionDraft {
            title: "Happy hour".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(15, 0),
            start_date: Utc::now() - Duration::days(1),
            end_date: Utc::now() + Duration::days(1),
            banner_image_url: None,
            is_active: true,
            menu_item_ids: items,
        }
    }

    #[tokio::test]
    async fn test_list_attaches_links_and_status() {
        let now = Utc::now();
        let (record, _) = draft(vec![Uuid::new_v4()]).into_record().unwrap();
        let mut upcoming = promotion(&record);
        upcoming.start_date = now + Duration::days(2);
        upcoming.end_date = now + Duration::days(5);
        let running = promotion(&record);
        let item = Uuid::new_v4();
        let links = vec![PromotionItemLink { promotion_id: running.id, menu_item_id: item }];
        let promotions = vec![upcoming.clone(), running.clone()];

        let mut repo = MockPromotionRepository::new();
        repo.expect_list().returning(move |_| Ok(promotions.clone()));
        repo.expect_list_links()
            .withf(|_, ids| ids.len() == 2)
            .returning(move |_, _| Ok(links.clone()));

        let service = PromotionService::new(Arc::new(repo));
        let listed = service.list_at(&session(), now).await;
        assert_eq!(listed[0].status, PromotionStatus::Upcoming);
        assert!(listed[0].menu_item_ids.is_empty());
        assert_eq!(listed[1].status, PromotionStatus::Active);
        assert_eq!(listed[1].menu_item_ids, vec![item]);
    }

    #[tokio::test]
    async fn test_update_replaces_links_in_order() {
        let id = Uuid::new_v4();
        let items = vec![Uuid::new_v4(), Uuid::new_v4()];
        let expected_items = items.clone();
        let mut seq = Sequence::new();

        let mut repo = MockPromotionRepository::new();
        repo.expect_update()
            .with(always(), eq(id), always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _, record| {
                let mut p = promotion(record);
                p.id = id;
                Ok(p)
            });
        repo.expect_delete_links()
            .with(always(), eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        repo.expect_insert_links()
            .withf(move |_, links| {
                links.len() == 2 && links.iter().all(|l| l.promotion_id == id) && links[1].menu_item_id == expected_items[1]
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        repo.expect_create().never();

        let service = PromotionService::new(Arc::new(repo));
        let saved = service.save(&session(), Some(id), draft(items)).await.unwrap().unwrap();
        assert_eq!(saved.promotion.id, id);
        assert_eq!(saved.status, PromotionStatus::Active);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_backend() {
        let mut repo = MockPromotionRepository::new();
        repo.expect_create().never();

        let service = PromotionService::new(Arc::new(repo));
        assert!(service.save(&session(), None, draft(vec![])).await.is_err());

        let mut reversed = draft(vec![Uuid::new_v4()]);
        std::mem::swap(&mut reversed.start_date, &mut reversed.end_date);
        assert!(service.save(&session(), None, reversed).await.is_err());
    }

    #[tokio::test]
    async fn test_backend_failure_is_none() {
        let mut repo = MockPromotionRepository::new();
        repo.expect_create()
            .returning(|_, _| Err(DomainError::BackendError("boom".into())));
        let (record, _) = draft(vec![Uuid::new_v4()]).into_record().unwrap();
        let running = promotion(&record);
        let running_id = running.id;
        repo.expect_list().returning(move |_| Ok(vec![running.clone()]));
        repo.expect_set_active()
            .returning(|_, _, _| Err(DomainError::BackendError("boom".into())));

        let service = PromotionService::new(Arc::new(repo));
        assert!(service.save(&session(), None, draft(vec![Uuid::new_v4()])).await.unwrap().is_none());
        assert!(!service.set_active(&session(), running_id, false).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_promotion_cannot_be_toggled() {
        let now = Utc::now();
        let (record, _) = draft(vec![Uuid::new_v4()]).into_record().unwrap();
        let mut expired = promotion(&record);
        expired.start_date = now - Duration::days(10);
        expired.end_date = now - Duration::days(3);
        let upcoming = Promotion {
            id: Uuid::new_v4(),
            start_date: now + Duration::days(1),
            end_date: now + Duration::days(4),
            ..expired.clone()
        };
        let (expired_id, upcoming_id) = (expired.id, upcoming.id);
        let promotions = vec![expired, upcoming];

        let mut repo = MockPromotionRepository::new();
        repo.expect_list().returning(move |_| Ok(promotions.clone()));
        repo.expect_set_active()
            .with(always(), eq(upcoming_id), eq(true))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = PromotionService::new(Arc::new(repo));
        let err = service.set_active_at(&session(), expired_id, true, now).await.unwrap_err();
        assert!(err.is_validation());

        assert!(service.set_active_at(&session(), upcoming_id, true, now).await.unwrap());

        let missing = service.set_active_at(&session(), Uuid::new_v4(), true, now).await.unwrap_err();
        assert!(matches!(missing, DomainError::NotFound(_)));
    }
}
