// ============================================================================
// MenuQR Infrastructure - Backend Client
// File: crates/menuqr-infrastructure/src/backend/client.rs
// ============================================================================
//! Thin typed wrapper over the backend's REST (`/rest/v1`), RPC
//! (`/rest/v1/rpc`) and auth (`/auth/v1`) endpoints.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use menuqr_security::Session;
use menuqr_shared::config::BackendSettings;

use super::error::BackendError;

/// Credentials attached to a request.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    /// Public access with the anonymous key.
    Anon,
    Session(&'a Session),
}

/// Query parameters in PostgREST filter syntax, e.g. `("id", "eq.<uuid>")`.
pub type Query = Vec<(&'static str, String)>;

pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

pub fn in_list<T: std::fmt::Display>(values: &[T]) -> String {
    let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("in.({})", joined.join(","))
}

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        Url::parse(&settings.url).map_err(|e| BackendError::Config(format!("backend.url: {}", e)))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.url.trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.clone(),
        })
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, BackendError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| BackendError::Config(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, auth: Auth<'_>) -> RequestBuilder {
        let bearer = match auth {
            Auth::Anon => format!("Bearer {}", self.anon_key),
            Auth::Session(session) => session.bearer(),
        };
        debug!("{} {}", method, url.path());
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, bearer)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::from_body(status.as_u16(), &body))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn first<T>(table: &str, rows: Vec<T>) -> Result<T, BackendError> {
        rows.into_iter().next().ok_or_else(|| BackendError::NoRows(table.to_string()))
    }

    // ------------------------------------------------------------------
    // Tables
    // ------------------------------------------------------------------

    pub async fn select<T: DeserializeOwned>(
        &self,
        auth: Auth<'_>,
        table: &str,
        query: Query,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.url(&format!("/rest/v1/{}", table), &query)?;
        let response = Self::send(self.request(Method::GET, url, auth)).await?;
        Self::json(response).await
    }

    pub async fn select_one<T: DeserializeOwned>(
        &self,
        auth: Auth<'_>,
        table: &str,
        mut query: Query,
    ) -> Result<Option<T>, BackendError> {
        query.push(("limit", "1".to_string()));
        Ok(self.select(auth, table, query).await?.into_iter().next())
    }

    /// Exact row count from the `Content-Range` header, without fetching rows.
    pub async fn count(&self, auth: Auth<'_>, table: &str, query: Query) -> Result<u64, BackendError> {
        let url = self.url(&format!("/rest/v1/{}", table), &query)?;
        let response = Self::send(
            self.request(Method::HEAD, url, auth)
                .header("Prefer", "count=exact"),
        )
        .await?;

        let range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| BackendError::Decode("missing Content-Range".into()))?;
        parse_total(range)
    }

    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        auth: Auth<'_>,
        table: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = self.url(&format!("/rest/v1/{}", table), &[])?;
        let response = Self::send(
            self.request(Method::POST, url, auth)
                .header("Prefer", "return=representation")
                .json(body),
        )
        .await?;
        Self::first(table, Self::json(response).await?)
    }

    pub async fn insert_silent<B: Serialize + ?Sized>(
        &self,
        auth: Auth<'_>,
        table: &str,
        body: &B,
    ) -> Result<(), BackendError> {
        let url = self.url(&format!("/rest/v1/{}", table), &[])?;
        Self::send(
            self.request(Method::POST, url, auth)
                .header("Prefer", "return=minimal")
                .json(body),
        )
        .await?;
        Ok(())
    }

    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        auth: Auth<'_>,
        table: &str,
        query: Query,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = self.url(&format!("/rest/v1/{}", table), &query)?;
        let response = Self::send(
            self.request(Method::PATCH, url, auth)
                .header("Prefer", "return=representation")
                .json(body),
        )
        .await?;
        Self::first(table, Self::json(response).await?)
    }

    pub async fn update_silent<B: Serialize + ?Sized>(
        &self,
        auth: Auth<'_>,
        table: &str,
        query: Query,
        body: &B,
    ) -> Result<(), BackendError> {
        let url = self.url(&format!("/rest/v1/{}", table), &query)?;
        Self::send(
            self.request(Method::PATCH, url, auth)
                .header("Prefer", "return=minimal")
                .json(body),
        )
        .await?;
        Ok(())
    }

    pub async fn delete(&self, auth: Auth<'_>, table: &str, query: Query) -> Result<(), BackendError> {
        let url = self.url(&format!("/rest/v1/{}", table), &query)?;
        Self::send(self.request(Method::DELETE, url, auth)).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // RPC
    // ------------------------------------------------------------------

    pub async fn rpc<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        auth: Auth<'_>,
        function: &str,
        args: &B,
    ) -> Result<T, BackendError> {
        let url = self.url(&format!("/rest/v1/rpc/{}", function), &[])?;
        let response = Self::send(self.request(Method::POST, url, auth).json(args)).await?;
        Self::json(response).await
    }

    /// Calls a function that returns `void`; the body is ignored.
    pub async fn rpc_void<B: Serialize + ?Sized>(
        &self,
        auth: Auth<'_>,
        function: &str,
        args: &B,
    ) -> Result<(), BackendError> {
        let url = self.url(&format!("/rest/v1/rpc/{}", function), &[])?;
        Self::send(self.request(Method::POST, url, auth).json(args)).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn auth_call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        auth: Auth<'_>,
        path: &str,
        query: Query,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = self.url(&format!("/auth/v1/{}", path), &query)?;
        let response = Self::send(self.request(method, url, auth).json(body)).await?;
        Self::json(response).await
    }

    pub async fn auth_call_void(&self, method: Method, auth: Auth<'_>, path: &str) -> Result<(), BackendError> {
        let url = self.url(&format!("/auth/v1/{}", path), &[])?;
        Self::send(self.request(method, url, auth)).await?;
        Ok(())
    }
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/0`.
fn parse_total(range: &str) -> Result<u64, BackendError> {
    range
        .rsplit_once('/')
        .and_then(|(_, total)| total.parse().ok())
        .ok_or_else(|| BackendError::Decode(format!("unusable Content-Range: {}", range)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use uuid::Uuid;
    use wiremock::MockServer;

    pub const ANON_KEY: &str = "anon-key";

    pub fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendSettings {
            url: server.uri(),
            anon_key: ANON_KEY.to_string(),
            jwt_secret: None,
            timeout_seconds: 5,
        })
        .unwrap()
    }

    pub fn session() -> Session {
        Session {
            access_token: "user-token".to_string(),
            profile_id: Uuid::new_v4(),
            email: Some("owner@bistro.com".to_string()),
            expires_at: Utc::now() + ChronoDuration::hours(1),
        }
    }
}
