// ============================================================================
// MenuQR Infrastructure - Settings Repository
// File: crates/menuqr-infrastructure/src/backend/rest/settings_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use uuid::Uuid;

use menuqr_core::domain::{NewUserSettings, SettingsUpdate, ThemeSettings, UserSettings};
use menuqr_core::error::DomainError;
use menuqr_core::repositories::{Session, SettingsRepository};

use super::log_err;
use crate::backend::client::{eq, Auth, BackendClient};

const USER_SETTINGS: &str = "user_settings";
const THEME_SETTINGS: &str = "theme_settings";

pub struct RestSettingsRepository {
    client: BackendClient,
}

impl RestSettingsRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

/// Row body for `theme_settings`: owner set from the session, id never written.
fn theme_row(session: &Session, theme: &ThemeSettings) -> ThemeSettings {
    ThemeSettings { id: None, ..theme.clone() }.owned_by(session.profile_id)
}

#[async_trait]
impl SettingsRepository for RestSettingsRepository {
    // user_settings is keyed by the profile id itself.
    async fn find_settings(&self, session: &Session) -> Result<Option<UserSettings>, DomainError> {
        self.client
            .select_one(Auth::Session(session), USER_SETTINGS, vec![("id", eq(session.profile_id))])
            .await
            .map_err(log_err("fetching settings"))
    }

    async fn insert_settings(&self, session: &Session, settings: &NewUserSettings) -> Result<UserSettings, DomainError> {
        self.client
            .insert(Auth::Session(session), USER_SETTINGS, settings)
            .await
            .map_err(log_err("creating settings"))
    }

    async fn update_settings(&self, session: &Session, update: &SettingsUpdate) -> Result<UserSettings, DomainError> {
        self.client
            .update(Auth::Session(session), USER_SETTINGS, vec![("id", eq(session.profile_id))], update)
            .await
            .map_err(log_err("updating settings"))
    }

    async fn find_theme(&self, session: &Session) -> Result<Option<ThemeSettings>, DomainError> {
        self.client
            .select_one(
                Auth::Session(session),
                THEME_SETTINGS,
                vec![("profile_id", eq(session.profile_id))],
            )
            .await
            .map_err(log_err("fetching theme"))
    }

    async fn insert_theme(&self, session: &Session, theme: &ThemeSettings) -> Result<ThemeSettings, DomainError> {
        self.client
            .insert(Auth::Session(session), THEME_SETTINGS, &theme_row(session, theme))
            .await
            .map_err(log_err("creating theme"))
    }

    async fn update_theme(&self, session: &Session, id: Uuid, theme: &ThemeSettings) -> Result<ThemeSettings, DomainError> {
        self.client
            .update(
                Auth::Session(session),
                THEME_SETTINGS,
                vec![("id", eq(id))],
                &theme_row(session, theme),
            )
            .await
            .map_err(log_err("updating theme"))
    }
}
