// ============================================================================
// MenuQR Core - Settings Service
// File: crates/menuqr-core/src/services/settings_service.rs
// ============================================================================
//! Account preferences and public menu theme.
//!
//! Settings rows are created with defaults the first time they are read.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use menuqr_security::Session;

use crate::domain::{NewUserSettings, SettingsUpdate, ThemeMode, ThemeSettings, UserSettings};
use crate::error::DomainError;
use crate::repositories::{SettingsRepository, ThemePreferenceCache};

pub struct SettingsService<
    R: SettingsRepository + ?Sized = dyn SettingsRepository,
    C: ThemePreferenceCache + ?Sized = dyn ThemePreferenceCache,
> {
    repo: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> SettingsService<R, C>
where
    R: SettingsRepository + ?Sized,
    C: ThemePreferenceCache + ?Sized,
{
    pub fn new(repo: Arc<R>, cache: Arc<C>) -> Self {
        Self { repo, cache }
    }

    async fn find_or_create(&self, session: &Session) -> Result<UserSettings, DomainError> {
        if let Some(settings) = self.repo.find_settings(session).await? {
            return Ok(settings);
        }
        info!("Creating default settings for {}", session.profile_id);
        self.repo
            .insert_settings(session, &NewUserSettings::defaults_for(session.profile_id))
            .await
    }

    pub async fn settings(&self, session: &Session) -> Option<UserSettings> {
        match self.find_or_create(session).await {
            Ok(settings) => {
                // A locally chosen mode is newer than the remote one.
                if self.cached_theme_mode(session.profile_id).await.is_none() {
                    self.remember(session.profile_id, settings.theme).await;
                }
                Some(settings)
            }
            Err(e) => {
                error!("Error fetching user settings: {}", e);
                None
            }
        }
    }

    pub async fn update_settings(&self, session: &Session, update: SettingsUpdate) -> Option<UserSettings> {
        match self.repo.update_settings(session, &update).await {
            Ok(settings) => Some(settings),
            Err(e) => {
                error!("Error updating user settings: {}", e);
                None
            }
        }
    }

    /// Last mode applied on this host, available before the remote fetch.
    pub async fn cached_theme_mode(&self, profile_id: Uuid) -> Option<ThemeMode> {
        self.cache.load(profile_id).await.unwrap_or_else(|e| {
            warn!("Theme preference cache unreadable: {}", e);
            None
        })
    }

    /// Mode to apply right away: the cached choice, else the remote setting.
    pub async fn theme_mode(&self, session: &Session) -> ThemeMode {
        if let Some(mode) = self.cached_theme_mode(session.profile_id).await {
            return mode;
        }
        self.settings(session).await.map(|s| s.theme).unwrap_or_default()
    }

    /// Caches the mode locally first, then saves it remotely.
    pub async fn set_theme_mode(&self, session: &Session, mode: ThemeMode) -> Option<UserSettings> {
        self.remember(session.profile_id, mode).await;
        self.update_settings(session, SettingsUpdate { theme: Some(mode), ..SettingsUpdate::default() })
            .await
    }

    async fn remember(&self, profile_id: Uuid, mode: ThemeMode) {
        if let Err(e) = self.cache.store(profile_id, mode).await {
            warn!("Could not cache theme preference: {}", e);
        }
    }

    /// The profile's theme, or the defaults when none is saved.
    pub async fn theme(&self, session: &Session) -> ThemeSettings {
        match self.repo.find_theme(session).await {
            Ok(Some(theme)) => theme,
            Ok(None) => ThemeSettings::default().owned_by(session.profile_id),
            Err(e) => {
                error!("Error loading theme settings: {}", e);
                ThemeSettings::default().owned_by(session.profile_id)
            }
        }
    }

    /// Updates the saved theme, or inserts the first one.
    pub async fn save_theme(&self, session: &Session, theme: ThemeSettings) -> Result<Option<ThemeSettings>, DomainError> {
        theme.validate()?;
        let theme = theme.owned_by(session.profile_id);

        let saved = match self.repo.find_theme(session).await {
            Ok(Some(ThemeSettings { id: Some(id), .. })) => self.repo.update_theme(session, id, &theme).await,
            Ok(_) => self.repo.insert_theme(session, &theme).await,
            Err(e) => Err(e),
        };

        Ok(saved.map_err(|e| error!("Error saving theme settings: {}", e)).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockSettingsRepository, MockThemePreferenceCache};
    use crate::services::test_support::session;
    use chrono::Utc;
    use mockall::predicate::*;

    fn stored(new: &NewUserSettings) -> UserSettings {
        UserSettings {
            id: new.id,
            email_notifications: new.email_notifications,
            whatsapp_support: new.whatsapp_support,
            theme: new.theme,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quiet_cache() -> MockThemePreferenceCache {
        let mut cache = MockThemePreferenceCache::new();
        cache.expect_load().returning(|_| Ok(None));
        cache.expect_store().returning(|_, _| Ok(()));
        cache
    }

    #[tokio::test]
    async fn test_first_read_creates_defaults() {
        let session = session();
        let profile_id = session.profile_id;

        let mut repo = MockSettingsRepository::new();
        repo.expect_find_settings().times(1).returning(|_| Ok(None));
        repo.expect_insert_settings()
            .withf(move |_, new| *new == NewUserSettings::defaults_for(profile_id))
            .times(1)
            .returning(|_, new| Ok(stored(new)));

        let mut cache = MockThemePreferenceCache::new();
        cache.expect_load().times(1).returning(|_| Ok(None));
        cache.expect_store()
            .with(eq(profile_id), eq(ThemeMode::Light))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = SettingsService::new(Arc::new(repo), Arc::new(cache));
        let settings = service.settings(&session).await.unwrap();
        assert!(settings.email_notifications);
        assert!(!settings.whatsapp_support);
        assert_eq!(settings.theme, ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_existing_settings_are_not_recreated() {
        let session = session();
        let existing = stored(&NewUserSettings { theme: ThemeMode::Dark, ..NewUserSettings::defaults_for(session.profile_id) });

        let mut repo = MockSettingsRepository::new();
        repo.expect_find_settings().returning(move |_| Ok(Some(existing.clone())));
        repo.expect_insert_settings().never();

        let service = SettingsService::new(Arc::new(repo), Arc::new(quiet_cache()));
        assert_eq!(service.settings(&session).await.unwrap().theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_set_theme_mode_caches_before_remote_write() {
        let session = session();
        let mut seq = mockall::Sequence::new();

        let mut cache = MockThemePreferenceCache::new();
        cache.expect_store()
            .with(always(), eq(ThemeMode::Dark))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut repo = MockSettingsRepository::new();
        repo.expect_update_settings()
            .withf(|_, update| update.theme == Some(ThemeMode::Dark) && update.email_notifications.is_none())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(DomainError::BackendError("offline".into())));

        let service = SettingsService::new(Arc::new(repo), Arc::new(cache));
        assert!(service.set_theme_mode(&session, ThemeMode::Dark).await.is_none());
    }

    #[tokio::test]
    async fn test_local_choice_survives_stale_remote_read() {
        let session = session();
        let remote = stored(&NewUserSettings { theme: ThemeMode::Light, ..NewUserSettings::defaults_for(session.profile_id) });

        let mut repo = MockSettingsRepository::new();
        repo.expect_find_settings().returning(move |_| Ok(Some(remote.clone())));

        let mut cache = MockThemePreferenceCache::new();
        cache.expect_load().returning(|_| Ok(Some(ThemeMode::Dark)));
        cache.expect_store().never();

        let service = SettingsService::new(Arc::new(repo), Arc::new(cache));
        assert_eq!(service.settings(&session).await.unwrap().theme, ThemeMode::Light);
        assert_eq!(service.theme_mode(&session).await, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_theme_mode_falls_back_to_remote_then_default() {
        let session = session();
        let remote = stored(&NewUserSettings { theme: ThemeMode::Dark, ..NewUserSettings::defaults_for(session.profile_id) });

        let mut repo = MockSettingsRepository::new();
        repo.expect_find_settings().times(1).returning(move |_| Ok(Some(remote.clone())));
        let service = SettingsService::new(Arc::new(repo), Arc::new(quiet_cache()));
        assert_eq!(service.theme_mode(&session).await, ThemeMode::Dark);

        let mut offline = MockSettingsRepository::new();
        offline.expect_find_settings().returning(|_| Err(DomainError::BackendError("offline".into())));
        let service = SettingsService::new(Arc::new(offline), Arc::new(quiet_cache()));
        assert_eq!(service.theme_mode(&session).await, ThemeMode::default());
    }

    #[tokio::test]
    async fn test_cache_failure_is_ignored() {
        let mut cache = MockThemePreferenceCache::new();
        cache.expect_load().returning(|_| Err(DomainError::InternalError("corrupt".into())));
        let service = SettingsService::new(Arc::new(MockSettingsRepository::new()), Arc::new(cache));
        assert!(service.cached_theme_mode(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_theme_defaults_and_upsert() {
        let session = session();
        let theme_id = Uuid::new_v4();

        let mut repo = MockSettingsRepository::new();
        let mut reads = 0;
        repo.expect_find_theme().times(3).returning(move |_| {
            reads += 1;
            Ok((reads > 2).then(|| ThemeSettings { id: Some(theme_id), ..ThemeSettings::default() }))
        });
        repo.expect_insert_theme().times(1).returning(|_, theme| Ok(theme.clone()));
        repo.expect_update_theme()
            .with(always(), eq(theme_id), always())
            .times(1)
            .returning(|_, _, theme| Ok(theme.clone()));

        let service = SettingsService::new(Arc::new(repo), Arc::new(quiet_cache()));
        let defaults = service.theme(&session).await;
        assert_eq!(defaults.primary_color, "#0f766e");
        assert_eq!(defaults.profile_id, Some(session.profile_id));

        let inserted = service.save_theme(&session, ThemeSettings::default()).await.unwrap().unwrap();
        assert_eq!(inserted.profile_id, Some(session.profile_id));

        let dark = ThemeSettings { primary_color: "#111827".into(), ..ThemeSettings::default() };
        let updated = service.save_theme(&session, dark).await.unwrap().unwrap();
        assert_eq!(updated.primary_color, "#111827");
    }

    #[tokio::test]
    async fn test_invalid_theme_rejected() {
        let mut repo = MockSettingsRepository::new();
        repo.expect_find_theme().never();
        let service = SettingsService::new(Arc::new(repo), Arc::new(quiet_cache()));
        let theme = ThemeSettings { primary_color: "teal".into(), ..ThemeSettings::default() };
        assert!(service.save_theme(&session(), theme).await.is_err());
    }
}
