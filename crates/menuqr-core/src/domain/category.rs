// ============================================================================
// MenuQR Core - Category Entity
// File: crates/menuqr-core/src/domain/category.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::ordering::Orderable;

/// Menu category owned by a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Orderable for Category {
    fn id(&self) -> Uuid {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }
}

/// Owner input for creating or renaming a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryDraft {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,
}

impl CategoryDraft {
    pub fn normalized(self) -> Result<Self, validator::ValidationErrors> {
        let draft = Self {
            name: self.name.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Insert payload sent to the backend
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub profile_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
}
