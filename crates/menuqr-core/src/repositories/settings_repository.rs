//! Settings repository trait (port) and the local theme-mode cache

use async_trait::async_trait;
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::{NewUserSettings, SettingsUpdate, ThemeMode, ThemeSettings, UserSettings};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find_settings(&self, session: &Session) -> Result<Option<UserSettings>, DomainError>;
    async fn insert_settings(&self, session: &Session, settings: &NewUserSettings) -> Result<UserSettings, DomainError>;
    async fn update_settings(&self, session: &Session, update: &SettingsUpdate) -> Result<UserSettings, DomainError>;

    async fn find_theme(&self, session: &Session) -> Result<Option<ThemeSettings>, DomainError>;
    async fn insert_theme(&self, session: &Session, theme: &ThemeSettings) -> Result<ThemeSettings, DomainError>;
    async fn update_theme(&self, session: &Session, id: Uuid, theme: &ThemeSettings) -> Result<ThemeSettings, DomainError>;
}

/// Locally persisted theme-mode preference, read before the remote fetch.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ThemePreferenceCache: Send + Sync {
    async fn load(&self, profile_id: Uuid) -> Result<Option<ThemeMode>, DomainError>;
    async fn store(&self, profile_id: Uuid, mode: ThemeMode) -> Result<(), DomainError>;
}
