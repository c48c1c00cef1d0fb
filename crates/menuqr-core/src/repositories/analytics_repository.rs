//! Analytics repository trait (port)

use async_trait::async_trait;
use chrono::NaiveDate;

use menuqr_security::Session;

use crate::domain::{DailyMenuScan, MenuItemView, MenuView, NewMenuView, PopularMenuItem};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Scans between `since` and `until` inclusive, newest date first.
    async fn daily_scans(&self, session: &Session, since: NaiveDate, until: NaiveDate) -> Result<Vec<DailyMenuScan>, DomainError>;
    async fn popular_items(&self, session: &Session, limit: usize) -> Result<Vec<PopularMenuItem>, DomainError>;
    async fn total_views(&self, session: &Session) -> Result<u64, DomainError>;

    // Diner-side writes, made with the anonymous key.
    async fn record_menu_view(&self, view: &NewMenuView) -> Result<MenuView, DomainError>;
    async fn record_item_view(&self, view: &MenuItemView) -> Result<(), DomainError>;
}
