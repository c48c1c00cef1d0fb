// ============================================================================
// MenuQR Core - Menu Item Ratings
// File: crates/menuqr-core/src/domain/rating.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemRating {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Diner-submitted review
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRating {
    pub menu_item_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Comment too long"))]
    pub comment: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Please enter your name"))]
    pub customer_name: String,
}

impl NewRating {
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let rating = Self {
            customer_name: self.customer_name.trim().to_string(),
            comment: self.comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            ..self
        };
        rating.validate()?;
        Ok(rating)
    }
}

/// Reviews of one item with their aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub menu_item_id: Uuid,
    pub average: f64,
    pub count: usize,
    pub ratings: Vec<MenuItemRating>,
}

impl RatingSummary {
    pub fn from_ratings(menu_item_id: Uuid, ratings: Vec<MenuItemRating>) -> Self {
        let count = ratings.len();
        let average = if count == 0 {
            0.0
        } else {
            let sum: u32 = ratings.iter().map(|r| u32::from(r.rating)).sum();
            (f64::from(sum) / count as f64 * 10.0).round() / 10.0
        };
        Self { menu_item_id, average, count, ratings }
    }

    /// Five star slots: `Full`, `Half` or `Empty`.
    pub fn stars(&self) -> [Star; 5] {
        let full = self.average.floor() as usize;
        let half = self.average % 1.0 >= 0.5;
        let mut stars = [Star::Empty; 5];
        for (index, star) in stars.iter_mut().enumerate() {
            if index < full {
                *star = Star::Full;
            } else if index == full && half {
                *star = Star::Half;
            }
        }
        stars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Star {
    Full,
    Half,
    Empty,
}
