// ============================================================================
// MenuQR Core - Analytics Rows
// File: crates/menuqr-core/src/domain/analytics.rs
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `daily_menu_scans` view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMenuScan {
    pub profile_id: Uuid,
    pub scan_date: NaiveDate,
    pub scan_count: u64,
}

/// Row of the `popular_menu_items` view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularMenuItem {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub profile_id: Uuid,
    pub business_name: Option<String>,
    pub view_count: u64,
}

/// A diner opening the public menu
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuViewMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMenuView {
    pub profile_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_id: Option<Uuid>,
    #[serde(flatten)]
    pub metadata: MenuViewMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuView {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub qr_code_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemView {
    pub menu_item_id: Uuid,
    pub menu_view_id: Uuid,
}

/// Owner dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_views: u64,
    pub scans_in_window: u64,
    pub daily_scans: Vec<DailyMenuScan>,
    pub popular_items: Vec<PopularMenuItem>,
}

impl DashboardStats {
    pub fn new(total_views: u64, daily_scans: Vec<DailyMenuScan>, popular_items: Vec<PopularMenuItem>) -> Self {
        let scans_in_window = daily_scans.iter().map(|d| d.scan_count).sum();
        Self { total_views, scans_in_window, daily_scans, popular_items }
    }
}
