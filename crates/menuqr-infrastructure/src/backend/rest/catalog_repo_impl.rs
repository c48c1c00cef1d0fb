// ============================================================================
// MenuQR Infrastructure - Ratings & Languages
// File: crates/menuqr-infrastructure/src/backend/rest/catalog_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use uuid::Uuid;

use menuqr_core::domain::{Language, MenuItemRating, NewRating};
use menuqr_core::error::DomainError;
use menuqr_core::repositories::{LanguageRepository, RatingRepository};

use super::log_err;
use crate::backend::client::{eq, Auth, BackendClient};

pub struct RestRatingRepository {
    client: BackendClient,
}

impl RestRatingRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RatingRepository for RestRatingRepository {
    async fn list_for_item(&self, menu_item_id: Uuid) -> Result<Vec<MenuItemRating>, DomainError> {
        self.client
            .select(
                Auth::Anon,
                "menu_item_ratings",
                vec![
                    ("menu_item_id", eq(menu_item_id)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await
            .map_err(log_err("listing ratings"))
    }

    async fn insert(&self, rating: &NewRating) -> Result<(), DomainError> {
        self.client
            .insert_silent(Auth::Anon, "menu_item_ratings", rating)
            .await
            .map_err(log_err("submitting rating"))
    }
}

pub struct RestLanguageRepository {
    client: BackendClient,
}

impl RestLanguageRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LanguageRepository for RestLanguageRepository {
    async fn list_active(&self) -> Result<Vec<Language>, DomainError> {
        self.client
            .select(
                Auth::Anon,
                "languages",
                vec![
                    ("select", "code,name".into()),
                    ("is_active", "eq.true".into()),
                    ("order", "name.asc".into()),
                ],
            )
            .await
            .map_err(log_err("listing languages"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::client::test_support::client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_active_languages_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/languages"))
            .and(query_param("is_active", "eq.true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "code": "de", "name": "Deutsch" },
                { "code": "en", "name": "English" }
            ])))
            .mount(&server)
            .await;

        let languages = RestLanguageRepository::new(client(&server)).list_active().await.unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].code, "de");
    }

    #[tokio::test]
    async fn test_ratings_for_item() {
        let server = MockServer::start().await;
        let item = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path("/rest/v1/menu_item_ratings"))
            .and(query_param("menu_item_id", format!("eq.{}", item)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": Uuid::new_v4(),
                "menu_item_id": item,
                "rating": 4,
                "comment": "Lovely",
                "customer_name": "Ana",
                "created_at": "2024-05-01T10:00:00Z"
            }])))
            .mount(&server)
            .await;

        let ratings = RestRatingRepository::new(client(&server)).list_for_item(item).await.unwrap();
        assert_eq!(ratings[0].rating, 4);
    }
}
