// ============================================================================
// MenuQR Core - Promotion Entity
// File: crates/menuqr-core/src/domain/promotion.rs
// Description: Discounts with a validity window, linked to menu items
// ============================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::menu_item::format_price;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::FixedAmount => "fixed_amount",
        }
    }
}

/// Where a promotion stands relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    Active,
    Inactive,
    Upcoming,
    Expired,
}

/// Promotion entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub banner_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    pub fn status_at(&self, now: DateTime<Utc>) -> PromotionStatus {
        if self.end_date < now {
            PromotionStatus::Expired
        } else if self.start_date > now {
            PromotionStatus::Upcoming
        } else if self.is_active {
            PromotionStatus::Active
        } else {
            PromotionStatus::Inactive
        }
    }

    pub fn discount_label(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("{}% off", self.discount_value.normalize()),
            DiscountType::FixedAmount => format!("${} off", format_price(self.discount_value)),
        }
    }
}

/// Join row of `promotion_menu_items`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionItemLink {
    pub promotion_id: Uuid,
    pub menu_item_id: Uuid,
}

/// Promotion together with the ids of the items it applies to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionWithItems {
    #[serde(flatten)]
    pub promotion: Promotion,
    pub menu_item_ids: Vec<Uuid>,
    pub status: PromotionStatus,
}

fn default_active() -> bool {
    true
}

/// Owner input from the promotion form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub menu_item_ids: Vec<Uuid>,
}

impl PromotionDraft {
    /// Splits the draft into the row to persist and the item ids to link.
    pub fn into_record(self) -> Result<(PromotionRecord, Vec<Uuid>), DomainError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::ValidationError("Promotion title is required".into()));
        }
        if self.discount_value <= Decimal::ZERO {
            return Err(DomainError::ValidationError("Please enter a valid discount value".into()));
        }
        if self.discount_type == DiscountType::Percentage && self.discount_value > Decimal::ONE_HUNDRED {
            return Err(DomainError::ValidationError("Percentage discount cannot exceed 100".into()));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::ValidationError("End date must be after start date".into()));
        }
        if self.menu_item_ids.is_empty() {
            return Err(DomainError::ValidationError(
                "Please select at least one menu item for this promotion".into(),
            ));
        }

        let mut item_ids = self.menu_item_ids;
        let mut seen = std::collections::HashSet::new();
        item_ids.retain(|id| seen.insert(*id));

        Ok((
            PromotionRecord {
                title,
                description: self.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty()),
                discount_type: self.discount_type,
                discount_value: self.discount_value,
                start_date: self.start_date,
                end_date: self.end_date,
                banner_image_url: self.banner_image_url.filter(|u| !u.trim().is_empty()),
                is_active: self.is_active,
            },
            item_ids,
        ))
    }
}

/// Editable columns of a promotion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionRecord {
    pub title: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub banner_image_url: Option<String>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn promotion(start_offset_days: i64, end_offset_days: i64, is_active: bool) -> Promotion {
        let now = Utc::now();
        Promotion {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            title: "Happy hour".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(15, 0),
            start_date: now + Duration::days(start_offset_days),
            end_date: now + Duration::days(end_offset_days),
            banner_image_url: None,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_future_start_is_upcoming_even_when_active() {
        let p = promotion(2, 10, true);
        assert_eq!(p.status_at(Utc::now()), PromotionStatus::Upcoming);
    }

    #[test]
    fn test_status_window() {
        let now = Utc::now();
        assert_eq!(promotion(-2, 2, true).status_at(now), PromotionStatus::Active);
        assert_eq!(promotion(-2, 2, false).status_at(now), PromotionStatus::Inactive);
        assert_eq!(promotion(-10, -1, true).status_at(now), PromotionStatus::Expired);
    }

    #[test]
    fn test_discount_label() {
        let mut p = promotion(0, 1, true);
        assert_eq!(p.discount_label(), "15% off");
        p.discount_type = DiscountType::FixedAmount;
        p.discount_value = Decimal::new(5, 0);
        assert_eq!(p.discount_label(), "$5.00 off");
    }

    fn draft() -> PromotionDraft {
        let now = Utc::now();
        PromotionDraft {
            title: "Lunch deal".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(10, 0),
            start_date: now,
            end_date: now + Duration::days(7),
            banner_image_url: None,
            is_active: true,
            menu_item_ids: vec![Uuid::new_v4()],
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().into_record().is_ok());

        let mut backwards = draft();
        backwards.end_date = backwards.start_date - Duration::days(1);
        assert!(backwards.into_record().is_err());

        let mut no_items = draft();
        no_items.menu_item_ids.clear();
        assert!(no_items.into_record().is_err());

        let mut zero = draft();
        zero.discount_value = Decimal::ZERO;
        assert!(zero.into_record().is_err());

        let mut over = draft();
        over.discount_value = Decimal::new(150, 0);
        assert!(over.into_record().is_err());
    }

    #[test]
    fn test_draft_dedupes_items() {
        let id = Uuid::new_v4();
        let mut d = draft();
        d.menu_item_ids = vec![id, id];
        let (_, ids) = d.into_record().unwrap();
        assert_eq!(ids, vec![id]);
    }
}
