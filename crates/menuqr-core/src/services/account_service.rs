// ============================================================================
// MenuQR Core - Account Service
// File: crates/menuqr-core/src/services/account_service.rs
// ============================================================================
//! Sign-up, sign-in and profile management.
//!
//! Unlike the menu facade these operations return errors: a failed login is
//! shown next to the form rather than as an empty screen.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};
use validator::Validate;

use menuqr_security::{PasswordPolicy, Session, TokenDecoder};

use crate::domain::{AuthGrant, AuthTokens, LoginCredentials, Profile, ProfileUpdate, SignUpCredentials};
use crate::error::DomainError;
use crate::repositories::AccountRepository;

/// A signed-in account: the tokens plus the decoded session
#[derive(Debug, Clone, Serialize)]
pub struct SignedIn {
    pub tokens: AuthTokens,
    #[serde(skip)]
    pub session: Session,
}

pub struct AccountService<R: AccountRepository + ?Sized = dyn AccountRepository> {
    repo: Arc<R>,
    decoder: Arc<TokenDecoder>,
}

impl<R: AccountRepository + ?Sized> AccountService<R> {
    pub fn new(repo: Arc<R>, decoder: Arc<TokenDecoder>) -> Self {
        Self { repo, decoder }
    }

    fn open_session(&self, tokens: &AuthTokens) -> Result<Session, DomainError> {
        Session::from_access_token(&tokens.access_token, &self.decoder).map_err(|e| {
            warn!("Backend issued an unusable token: {}", e);
            DomainError::Unauthorized
        })
    }

    /// Registers the account and writes the optional business details.
    ///
    /// When the backend requires email confirmation no tokens come back and
    /// the profile details are not written yet.
    pub async fn sign_up(&self, credentials: SignUpCredentials) -> Result<AuthGrant, DomainError> {
        credentials.validate()?;
        let mut hints = vec![credentials.email.as_str()];
        if let Some(name) = credentials.business_name.as_deref() {
            hints.push(name);
        }
        PasswordPolicy::check(&credentials.password, &hints)?;

        info!("Sign-up attempt for {}", menuqr_shared::utils::mask_email(&credentials.email));
        let grant = self.repo.sign_up(&credentials.email, &credentials.password).await?;

        let update = credentials.profile_update();
        if let (Some(tokens), false) = (grant.tokens.as_ref(), update.is_empty()) {
            let session = self.open_session(tokens)?;
            if let Err(e) = self.repo.update_profile(&session, &update).await {
                error!("Account {} created but profile update failed: {}", grant.user_id, e);
            }
        }

        info!("Account created: {}", grant.user_id);
        Ok(grant)
    }

    pub async fn sign_in(&self, credentials: LoginCredentials) -> Result<SignedIn, DomainError> {
        credentials.validate()?;
        let grant = self.repo.sign_in(&credentials).await.map_err(|e| {
            warn!("Login failed for {}: {}", menuqr_shared::utils::mask_email(&credentials.email), e);
            match e {
                DomainError::Unauthorized | DomainError::NotFound(_) => DomainError::InvalidCredentials,
                other => other,
            }
        })?;
        let tokens = grant.tokens.ok_or(DomainError::InvalidCredentials)?;
        let session = self.open_session(&tokens)?;

        info!("Login successful for {}", session.profile_id);
        Ok(SignedIn { tokens, session })
    }

    pub async fn sign_out(&self, session: &Session) -> bool {
        match self.repo.sign_out(session).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error signing out: {}", e);
                false
            }
        }
    }

    pub async fn change_password(&self, session: &Session, new_password: &str) -> Result<(), DomainError> {
        let email = session.email.clone().unwrap_or_default();
        PasswordPolicy::check(new_password, &[email.as_str()])?;
        self.repo.change_password(session, new_password).await?;
        info!("Password changed for {}", session.profile_id);
        Ok(())
    }

    pub async fn profile(&self, session: &Session) -> Option<Profile> {
        self.repo.get_profile(session).await.unwrap_or_else(|e| {
            error!("Error fetching profile: {}", e);
            None
        })
    }

    pub async fn update_profile(&self, session: &Session, update: ProfileUpdate) -> Result<Option<Profile>, DomainError> {
        update.validate()?;
        if update.is_empty() {
            return Err(DomainError::ValidationError("Nothing to update".into()));
        }
        Ok(self
            .repo
            .update_profile(session, &update)
            .await
            .map_err(|e| error!("Error updating profile: {}", e))
            .ok())
    }

    /// Permanently removes the account and everything it owns.
    pub async fn delete_account(&self, session: &Session) -> Result<(), DomainError> {
        self.repo.delete_account(session).await?;
        info!("Account deleted: {}", session.profile_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockAccountRepository;
    use crate::services::test_support::{access_token_for, session};
    use uuid::Uuid;

    const STRONG: &str = "correct-horse-battery-staple";

    fn service(repo: MockAccountRepository) -> AccountService {
        AccountService::new(Arc::new(repo), Arc::new(TokenDecoder::new(None)))
    }

    fn grant(user_id: Uuid, with_tokens: bool) -> AuthGrant {
        AuthGrant {
            user_id,
            email: Some("owner@bistro.com".into()),
            tokens: with_tokens.then(|| AuthTokens {
                access_token: access_token_for(user_id),
                refresh_token: Some("refresh".into()),
                expires_in: Some(3600),
            }),
        }
    }

    fn signup(password: &str) -> SignUpCredentials {
        SignUpCredentials {
            email: "owner@bistro.com".into(),
            password: password.into(),
            business_name: Some("Bistro".into()),
            address: None,
            business_hours: None,
            contact_info: None,
        }
    }

    #[tokio::test]
    async fn test_sign_up_writes_profile_details() {
        let user_id = Uuid::new_v4();
        let mut repo = MockAccountRepository::new();
        repo.expect_sign_up()
            .withf(|email, password| email == "owner@bistro.com" && password == STRONG)
            .times(1)
            .returning(move |_, _| Ok(grant(user_id, true)));
        repo.expect_update_profile()
            .withf(move |session, update| {
                session.profile_id == user_id && update.business_name.as_deref() == Some("Bistro")
            })
            .times(1)
            .returning(|_, _| Err(DomainError::BackendError("later".into())));

        let created = service(repo).sign_up(signup(STRONG)).await.unwrap();
        assert_eq!(created.user_id, user_id);
    }

    #[tokio::test]
    async fn test_sign_up_awaiting_confirmation_skips_profile() {
        let mut repo = MockAccountRepository::new();
        repo.expect_sign_up().returning(|_, _| Ok(grant(Uuid::new_v4(), false)));
        repo.expect_update_profile().never();
        assert!(service(repo).sign_up(signup(STRONG)).await.is_ok());
    }

    #[tokio::test]
    async fn test_weak_password_rejected_before_network() {
        let mut repo = MockAccountRepository::new();
        repo.expect_sign_up().never();
        let svc = service(repo);

        assert_eq!(svc.sign_up(signup("short")).await.unwrap_err(), DomainError::PasswordTooShort);
        assert_eq!(svc.sign_up(signup("aaaaaaaaaaaa")).await.unwrap_err(), DomainError::PasswordTooWeak);
    }

    #[tokio::test]
    async fn test_sign_in_opens_session() {
        let user_id = Uuid::new_v4();
        let mut repo = MockAccountRepository::new();
        repo.expect_sign_in().returning(move |_| Ok(grant(user_id, true)));

        let signed_in = service(repo)
            .sign_in(LoginCredentials { email: "owner@bistro.com".into(), password: STRONG.into() })
            .await
            .unwrap();
        assert_eq!(signed_in.session.profile_id, user_id);
    }

    #[tokio::test]
    async fn test_sign_in_maps_rejection_to_invalid_credentials() {
        let mut repo = MockAccountRepository::new();
        repo.expect_sign_in().returning(|_| Err(DomainError::Unauthorized));

        let err = service(repo)
            .sign_in(LoginCredentials { email: "owner@bistro.com".into(), password: "wrong".into() })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_update_profile_rules() {
        let mut repo = MockAccountRepository::new();
        repo.expect_update_profile().never();
        let svc = service(repo);
        assert!(svc.update_profile(&session(), ProfileUpdate::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_change_password_checks_policy() {
        let mut repo = MockAccountRepository::new();
        repo.expect_change_password()
            .withf(|_, password| password == STRONG)
            .times(1)
            .returning(|_, _| Ok(()));
        let svc = service(repo);
        assert!(svc.change_password(&session(), "1234").await.is_err());
        assert!(svc.change_password(&session(), STRONG).await.is_ok());
    }
}
