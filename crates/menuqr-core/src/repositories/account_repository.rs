//! Account repository trait (port): backend auth plus the profile row

use async_trait::async_trait;

use menuqr_security::Session;

use crate::domain::{AuthGrant, LoginCredentials, Profile, ProfileUpdate};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, DomainError>;
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<AuthGrant, DomainError>;
    async fn sign_out(&self, session: &Session) -> Result<(), DomainError>;
    async fn change_password(&self, session: &Session, new_password: &str) -> Result<(), DomainError>;
    async fn get_profile(&self, session: &Session) -> Result<Option<Profile>, DomainError>;
    async fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> Result<Profile, DomainError>;
    /// Removes the auth user and, by cascade, every row the profile owns.
    async fn delete_account(&self, session: &Session) -> Result<(), DomainError>;
}
