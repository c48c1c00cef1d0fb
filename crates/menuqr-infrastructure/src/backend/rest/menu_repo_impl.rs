// ============================================================================
// MenuQR Infrastructure - Menu Repository
// File: crates/menuqr-infrastructure/src/backend/rest/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use menuqr_core::domain::{
    Category, CategoryDraft, MenuItem, MenuItemRecord, NewCategory, NewMenuItem, OrderUpdate,
};
use menuqr_core::error::DomainError;
use menuqr_core::repositories::{MenuRepository, Session};

use super::log_err;
use crate::backend::client::{eq, in_list, Auth, BackendClient};

const CATEGORIES: &str = "categories";
const MENU_ITEMS: &str = "menu_items";

pub struct RestMenuRepository {
    client: BackendClient,
}

impl RestMenuRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MenuRepository for RestMenuRepository {
    async fn list_categories(&self, session: &Session) -> Result<Vec<Category>, DomainError> {
        self.client
            .select(
                Auth::Session(session),
                CATEGORIES,
                vec![
                    ("profile_id", eq(session.profile_id)),
                    ("order", "display_order.asc".into()),
                ],
            )
            .await
            .map_err(log_err("listing categories"))
    }

    async fn create_category(&self, session: &Session, category: &NewCategory) -> Result<Category, DomainError> {
        info!("Creating category: {}", category.name);
        self.client
            .insert(Auth::Session(session), CATEGORIES, category)
            .await
            .map_err(log_err("creating category"))
    }

    async fn update_category(&self, session: &Session, id: Uuid, draft: &CategoryDraft) -> Result<Category, DomainError> {
        self.client
            .update(Auth::Session(session), CATEGORIES, vec![("id", eq(id))], draft)
            .await
            .map_err(log_err("updating category"))
    }

    async fn delete_category(&self, session: &Session, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting category: {}", id);
        self.client
            .delete(Auth::Session(session), CATEGORIES, vec![("id", eq(id))])
            .await
            .map_err(log_err("deleting category"))
    }

    async fn list_items(&self, session: &Session, category_id: Uuid) -> Result<Vec<MenuItem>, DomainError> {
        self.client
            .select(
                Auth::Session(session),
                MENU_ITEMS,
                vec![
                    ("category_id", eq(category_id)),
                    ("order", "display_order.asc".into()),
                ],
            )
            .await
            .map_err(log_err("listing menu items"))
    }

    async fn list_items_in(&self, session: &Session, category_ids: &[Uuid]) -> Result<Vec<MenuItem>, DomainError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.client
            .select(
                Auth::Session(session),
                MENU_ITEMS,
                vec![
                    ("category_id", in_list(category_ids)),
                    ("order", "display_order.asc".into()),
                ],
            )
            .await
            .map_err(log_err("listing menu items"))
    }

    async fn create_item(&self, session: &Session, item: &NewMenuItem) -> Result<MenuItem, DomainError> {
        info!("Creating menu item: {}", item.record.name);
        self.client
            .insert(Auth::Session(session), MENU_ITEMS, item)
            .await
            .map_err(log_err("creating menu item"))
    }

    async fn update_item(&self, session: &Session, id: Uuid, record: &MenuItemRecord) -> Result<MenuItem, DomainError> {
        self.client
            .update(Auth::Session(session), MENU_ITEMS, vec![("id", eq(id))], record)
            .await
            .map_err(log_err("updating menu item"))
    }

    async fn delete_item(&self, session: &Session, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting menu item: {}", id);
        self.client
            .delete(Auth::Session(session), MENU_ITEMS, vec![("id", eq(id))])
            .await
            .map_err(log_err("deleting menu item"))
    }

    async fn reorder_categories(&self, session: &Session, updates: &[OrderUpdate]) -> Result<(), DomainError> {
        self.client
            .rpc_void(Auth::Session(session), "update_category_order", &json!({ "p_categories": updates }))
            .await
            .map_err(log_err("updating category order"))
    }

    async fn reorder_items(&self, session: &Session, updates: &[OrderUpdate]) -> Result<(), DomainError> {
        self.client
            .rpc_void(Auth::Session(session), "update_menu_item_order", &json!({ "p_items": updates }))
            .await
            .map_err(log_err("updating menu item order"))
    }

    async fn public_menu_rows(&self, profile_id: Uuid) -> Result<Vec<Value>, DomainError> {
        // Rows are decoded by the composer so one malformed row cannot sink the menu.
        let body: Value = self
            .client
            .rpc(Auth::Anon, "get_public_menu", &json!({ "profile_id": profile_id }))
            .await
            .map_err(log_err("fetching public menu"))?;

        match body {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(DomainError::BackendError(format!(
                "get_public_menu returned {} instead of an array",
                kind(&other)
            ))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::client::test_support::{client, session};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn category_json(id: Uuid, profile_id: Uuid, order: i32) -> Value {
        json!({
            "id": id,
            "profile_id": profile_id,
            "name": "Starters",
            "description": null,
            "display_order": order,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_categories_scoped_to_profile() {
        let server = MockServer::start().await;
        let session = session();
        let id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path("/rest/v1/categories"))
            .and(query_param("profile_id", format!("eq.{}", session.profile_id)))
            .and(query_param("order", "display_order.asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([category_json(id, session.profile_id, 0)])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = RestMenuRepository::new(client(&server));
        let categories = repo.list_categories(&session).await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, id);
    }

    #[tokio::test]
    async fn test_list_items_in_builds_in_filter() {
        let server = MockServer::start().await;
        let session = session();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        Mock::given(method("GET"))
            .and(path("/rest/v1/menu_items"))
            .and(query_param("category_id", format!("in.({},{})", a, b)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = RestMenuRepository::new(client(&server));
        assert!(repo.list_items_in(&session, &[a, b]).await.unwrap().is_empty());
        // No request for an empty id list.
        assert!(repo.list_items_in(&session, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reorder_items_calls_rpc_with_updates() {
        let server = MockServer::start().await;
        let session = session();
        let id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/update_menu_item_order"))
            .and(body_json(json!({ "p_items": [{ "id": id, "display_order": 3 }] })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let repo = RestMenuRepository::new(client(&server));
        repo.reorder_items(&session, &[OrderUpdate { id, display_order: 3 }])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_public_menu_rows_passes_raw_rows_through() {
        let server = MockServer::start().await;
        let profile_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/get_public_menu"))
            .and(body_json(json!({ "profile_id": profile_id })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "category_id": Uuid::new_v4(), "category_name": "Mains", "category_order": 0 },
                { "garbage": true }
            ])))
            .mount(&server)
            .await;

        let repo = RestMenuRepository::new(client(&server));
        let rows = repo.public_menu_rows(profile_id).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_public_menu_rejects_non_array_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/get_public_menu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
            .mount(&server)
            .await;

        let repo = RestMenuRepository::new(client(&server));
        let err = repo.public_menu_rows(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::BackendError(_)));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let server = MockServer::start().await;
        let session = session();
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let repo = RestMenuRepository::new(client(&server));
        let draft = CategoryDraft { name: "Drinks".into(), description: None };
        let err = repo.update_category(&session, Uuid::new_v4(), &draft).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
