// ============================================================================
// MenuQR Core - Analytics Service
// File: crates/menuqr-core/src/services/analytics_service.rs
// ============================================================================

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, error};
use uuid::Uuid;

use menuqr_shared::constants::{DEFAULT_POPULAR_ITEMS_LIMIT, DEFAULT_SCAN_WINDOW_DAYS};
use menuqr_security::Session;

use crate::domain::{DailyMenuScan, DashboardStats, MenuItemView, MenuViewMetadata, NewMenuView, PopularMenuItem};
use crate::repositories::AnalyticsRepository;

pub struct AnalyticsService<R: AnalyticsRepository + ?Sized = dyn AnalyticsRepository> {
    repo: Arc<R>,
}

impl<R: AnalyticsRepository + ?Sized> AnalyticsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn daily_scans(&self, session: &Session, days: u32) -> Vec<DailyMenuScan> {
        self.daily_scans_until(session, days, Utc::now().date_naive()).await
    }

    /// Scans over the `days` days ending at `today`, newest first.
    pub async fn daily_scans_until(&self, session: &Session, days: u32, today: NaiveDate) -> Vec<DailyMenuScan> {
        let since = today - Duration::days(i64::from(days));
        self.repo.daily_scans(session, since, today).await.unwrap_or_else(|e| {
            error!("Error fetching daily menu scans: {}", e);
            Vec::new()
        })
    }

    pub async fn popular_items(&self, session: &Session, limit: usize) -> Vec<PopularMenuItem> {
        self.repo.popular_items(session, limit).await.unwrap_or_else(|e| {
            error!("Error fetching popular menu items: {}", e);
            Vec::new()
        })
    }

    pub async fn total_views(&self, session: &Session) -> u64 {
        self.repo.total_views(session).await.unwrap_or_else(|e| {
            error!("Error fetching total menu views: {}", e);
            0
        })
    }

    pub async fn dashboard(&self, session: &Session) -> DashboardStats {
        let (total_views, daily_scans, popular_items) = tokio::join!(
            self.total_views(session),
            self.daily_scans(session, DEFAULT_SCAN_WINDOW_DAYS),
            self.popular_items(session, DEFAULT_POPULAR_ITEMS_LIMIT),
        );
        DashboardStats::new(total_views, daily_scans, popular_items)
    }

    /// Records a diner opening the menu; the id links later item views.
    pub async fn track_menu_view(&self, profile_id: Uuid, metadata: MenuViewMetadata) -> Option<Uuid> {
        self.record(NewMenuView { profile_id, qr_code_id: None, metadata }).await
    }

    pub async fn track_qr_scan(&self, qr_code_id: Uuid, profile_id: Uuid, metadata: MenuViewMetadata) -> bool {
        self.record(NewMenuView { profile_id, qr_code_id: Some(qr_code_id), metadata }).await.is_some()
    }

    async fn record(&self, view: NewMenuView) -> Option<Uuid> {
        match self.repo.record_menu_view(&view).await {
            Ok(recorded) => {
                debug!("Menu view {} recorded for {}", recorded.id, recorded.profile_id);
                Some(recorded.id)
            }
            Err(e) => {
                error!("Error tracking menu view: {}", e);
                None
            }
        }
    }

    pub async fn track_item_view(&self, menu_item_id: Uuid, menu_view_id: Uuid) -> bool {
        match self.repo.record_item_view(&MenuItemView { menu_item_id, menu_view_id }).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error tracking menu item view: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuView;
    use crate::error::DomainError;
    use crate::repositories::MockAnalyticsRepository;
    use crate::services::test_support::session;
    use mockall::predicate::*;

    #[tokio::test]
    async fn test_scan_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let since = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_daily_scans()
            .with(always(), eq(since), eq(today))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let service = AnalyticsService::new(Arc::new(repo));
        assert!(service.daily_scans_until(&session(), 30, today).await.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_degrades_per_metric() {
        let session = session();
        let profile_id = session.profile_id;
        let mut repo = MockAnalyticsRepository::new();
        repo.expect_total_views().returning(|_| Err(DomainError::BackendError("down".into())));
        repo.expect_daily_scans().returning(move |_, since, _| {
            Ok(vec![
                DailyMenuScan { profile_id, scan_date: since + Duration::days(2), scan_count: 4 },
                DailyMenuScan { profile_id, scan_date: since + Duration::days(1), scan_count: 3 },
            ])
        });
        repo.expect_popular_items()
            .with(always(), eq(10usize))
            .returning(|_, _| Ok(vec![]));

        let stats = AnalyticsService::new(Arc::new(repo)).dashboard(&session).await;
        assert_eq!(stats.total_views, 0);
        assert_eq!(stats.scans_in_window, 7);
        assert_eq!(stats.daily_scans.len(), 2);
    }

    #[tokio::test]
    async fn test_tracking() {
        let profile_id = Uuid::new_v4();
        let qr_code_id = Uuid::new_v4();
        let view_id = Uuid::new_v4();

        let mut repo = MockAnalyticsRepository::new();
        repo.expect_record_menu_view()
            .withf(move |view| view.profile_id == profile_id)
            .returning(move |view| Ok(MenuView { id: view_id, profile_id: view.profile_id, qr_code_id: view.qr_code_id }));
        repo.expect_record_item_view()
            .withf(move |view| view.menu_view_id == view_id)
            .returning(|_| Err(DomainError::BackendError("rls".into())));

        let service = AnalyticsService::new(Arc::new(repo));
        let metadata = MenuViewMetadata { user_agent: Some("Safari".into()), ..MenuViewMetadata::default() };
        assert_eq!(service.track_menu_view(profile_id, metadata.clone()).await, Some(view_id));
        assert!(service.track_qr_scan(qr_code_id, profile_id, metadata).await);
        assert!(!service.track_item_view(Uuid::new_v4(), view_id).await);
    }
}
