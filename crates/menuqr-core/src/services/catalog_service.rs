// ============================================================================
// MenuQR Core - Ratings & Languages
// File: crates/menuqr-core/src/services/catalog_service.rs
// ============================================================================

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{Language, NewRating, RatingSummary};
use crate::error::DomainError;
use crate::repositories::{LanguageRepository, RatingRepository};

pub struct RatingService<R: RatingRepository + ?Sized = dyn RatingRepository> {
    repo: Arc<R>,
}

impl<R: RatingRepository + ?Sized> RatingService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn summary(&self, menu_item_id: Uuid) -> RatingSummary {
        let ratings = self.repo.list_for_item(menu_item_id).await.unwrap_or_else(|e| {
            error!("Error loading ratings: {}", e);
            Vec::new()
        });
        RatingSummary::from_ratings(menu_item_id, ratings)
    }

    /// Stores a review and returns the refreshed summary, or `None` if the
    /// backend refused it.
    pub async fn submit(&self, rating: NewRating) -> Result<Option<RatingSummary>, DomainError> {
        let rating = rating.normalized()?;
        match self.repo.insert(&rating).await {
            Ok(()) => {
                info!("Rating submitted for {}", rating.menu_item_id);
                Ok(Some(self.summary(rating.menu_item_id).await))
            }
            Err(e) => {
                error!("Error submitting rating: {}", e);
                Ok(None)
            }
        }
    }
}

pub struct LanguageService<R: LanguageRepository + ?Sized = dyn LanguageRepository> {
    repo: Arc<R>,
}

impl<R: LanguageRepository + ?Sized> LanguageService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn languages(&self) -> Vec<Language> {
        match self.repo.list_active().await {
            Ok(languages) if !languages.is_empty() => languages,
            Ok(_) => Language::fallback(),
            Err(e) => {
                warn!("Error loading languages, using defaults: {}", e);
                Language::fallback()
            }
        }
    }
}
