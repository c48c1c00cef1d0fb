// ============================================================================
// MenuQR Infrastructure - Analytics Repository
// File: crates/menuqr-infrastructure/src/backend/rest/analytics_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use menuqr_core::domain::{DailyMenuScan, MenuItemView, MenuView, NewMenuView, PopularMenuItem};
use menuqr_core::error::DomainError;
use menuqr_core::repositories::{AnalyticsRepository, Session};

use super::log_err;
use crate::backend::client::{eq, Auth, BackendClient};

const DAILY_SCANS: &str = "daily_menu_scans";
const POPULAR_ITEMS: &str = "popular_menu_items";
const MENU_VIEWS: &str = "menu_views";
const MENU_ITEM_VIEWS: &str = "menu_item_views";

pub struct RestAnalyticsRepository {
    client: BackendClient,
}

impl RestAnalyticsRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalyticsRepository for RestAnalyticsRepository {
    async fn daily_scans(&self, session: &Session, since: NaiveDate, until: NaiveDate) -> Result<Vec<DailyMenuScan>, DomainError> {
        self.client
            .select(
                Auth::Session(session),
                DAILY_SCANS,
                vec![
                    ("profile_id", eq(session.profile_id)),
                    ("scan_date", format!("gte.{}", since)),
                    ("scan_date", format!("lte.{}", until)),
                    ("order", "scan_date.desc".into()),
                ],
            )
            .await
            .map_err(log_err("fetching daily scans"))
    }

    async fn popular_items(&self, session: &Session, limit: usize) -> Result<Vec<PopularMenuItem>, DomainError> {
        self.client
            .select(
                Auth::Session(session),
                POPULAR_ITEMS,
                vec![
                    ("profile_id", eq(session.profile_id)),
                    ("order", "view_count.desc".into()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
            .map_err(log_err("fetching popular items"))
    }

    async fn total_views(&self, session: &Session) -> Result<u64, DomainError> {
        self.client
            .count(Auth::Session(session), MENU_VIEWS, vec![("profile_id", eq(session.profile_id))])
            .await
            .map_err(log_err("counting menu views"))
    }

    // Diners are anonymous, so views are recorded with the public key.
    async fn record_menu_view(&self, view: &NewMenuView) -> Result<MenuView, DomainError> {
        debug!("Recording menu view for {}", view.profile_id);
        self.client
            .insert(Auth::Anon, MENU_VIEWS, view)
            .await
            .map_err(log_err("recording menu view"))
    }

    async fn record_item_view(&self, view: &MenuItemView) -> Result<(), DomainError> {
        self.client
            .insert_silent(Auth::Anon, MENU_ITEM_VIEWS, view)
            .await
            .map_err(log_err("recording item view"))
    }
}
