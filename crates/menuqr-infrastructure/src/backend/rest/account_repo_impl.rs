// ============================================================================
// MenuQR Infrastructure - Account Repository
// File: crates/menuqr-infrastructure/src/backend/rest/account_repo_impl.rs
// ============================================================================
//! Sign-up, sign-in and session calls against the auth service, plus the
//! owner's row in `profiles`.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use menuqr_core::domain::{AuthGrant, AuthTokens, LoginCredentials, Profile, ProfileUpdate};
use menuqr_core::error::DomainError;
use menuqr_core::repositories::{AccountRepository, Session};
use menuqr_shared::utils::mask_email;

use super::log_err;
use crate::backend::client::{eq, Auth, BackendClient};

const PROFILES: &str = "profiles";

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

/// Auth responses carry either a full session or, while the address awaits
/// confirmation, only the user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthResponse {
    Session {
        access_token: String,
        #[serde(default)]
        refresh_token: Option<String>,
        #[serde(default)]
        expires_in: Option<i64>,
        user: AuthUser,
    },
    User(AuthUser),
}

impl From<AuthResponse> for AuthGrant {
    fn from(response: AuthResponse) -> Self {
        match response {
            AuthResponse::Session { access_token, refresh_token, expires_in, user } => AuthGrant {
                user_id: user.id,
                email: user.email,
                tokens: Some(AuthTokens { access_token, refresh_token, expires_in }),
            },
            AuthResponse::User(user) => AuthGrant { user_id: user.id, email: user.email, tokens: None },
        }
    }
}

pub struct RestAccountRepository {
    client: BackendClient,
}

impl RestAccountRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountRepository for RestAccountRepository {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, DomainError> {
        info!("Registering account: {}", mask_email(email));
        let response: AuthResponse = self
            .client
            .auth_call(
                Method::POST,
                Auth::Anon,
                "signup",
                vec![],
                &json!({ "email": email, "password": password }),
            )
            .await
            .map_err(log_err("signing up"))?;
        Ok(response.into())
    }

    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<AuthGrant, DomainError> {
        let response: AuthResponse = self
            .client
            .auth_call(
                Method::POST,
                Auth::Anon,
                "token",
                vec![("grant_type", "password".into())],
                &json!({ "email": credentials.email, "password": credentials.password }),
            )
            .await
            .map_err(log_err("signing in"))?;
        Ok(response.into())
    }

    async fn sign_out(&self, session: &Session) -> Result<(), DomainError> {
        self.client
            .auth_call_void(Method::POST, Auth::Session(session), "logout")
            .await
            .map_err(log_err("signing out"))
    }

    async fn change_password(&self, session: &Session, new_password: &str) -> Result<(), DomainError> {
        let _: Value = self
            .client
            .auth_call(
                Method::PUT,
                Auth::Session(session),
                "user",
                vec![],
                &json!({ "password": new_password }),
            )
            .await
            .map_err(log_err("changing password"))?;
        Ok(())
    }

    async fn get_profile(&self, session: &Session) -> Result<Option<Profile>, DomainError> {
        self.client
            .select_one(Auth::Session(session), PROFILES, vec![("id", eq(session.profile_id))])
            .await
            .map_err(log_err("fetching profile"))
    }

    async fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> Result<Profile, DomainError> {
        self.client
            .update(Auth::Session(session), PROFILES, vec![("id", eq(session.profile_id))], update)
            .await
            .map_err(log_err("updating profile"))
    }

    async fn delete_account(&self, session: &Session) -> Result<(), DomainError> {
        info!("Deleting account: {}", session.profile_id);
        self.client
            .rpc_void(Auth::Session(session), "delete_user", &json!({}))
            .await
            .map_err(log_err("deleting account"))
    }
}
