// ============================================================================
// MenuQR Infrastructure - Theme Preference Cache
// File: crates/menuqr-infrastructure/src/cache/theme_cache.rs
// ============================================================================
//! Last known light/dark choice per profile, kept in a small JSON file so the
//! preference survives restarts and backend outages.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use menuqr_core::domain::ThemeMode;
use menuqr_core::error::DomainError;
use menuqr_core::repositories::ThemePreferenceCache;

pub struct FileThemeCache {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    lock: Mutex<()>,
}

impl FileThemeCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    async fn read_all(&self) -> HashMap<Uuid, ThemeMode> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("Theme cache unreadable at {}: {}", self.path.display(), e);
                return HashMap::new();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!("Theme cache corrupt at {}, starting fresh: {}", self.path.display(), e);
            HashMap::new()
        })
    }
}

fn io_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::InternalError(format!("theme cache: {}", e))
}

#[async_trait]
impl ThemePreferenceCache for FileThemeCache {
    async fn load(&self, profile_id: Uuid) -> Result<Option<ThemeMode>, DomainError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await.get(&profile_id).copied())
    }

    async fn store(&self, profile_id: Uuid, mode: ThemeMode) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await;
        entries.insert(profile_id, mode);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let bytes = serde_json::to_vec_pretty(&entries).map_err(io_err)?;
        tokio::fs::write(&self.path, bytes).await.map_err(io_err)?;
        debug!("Cached theme {:?} for {}", mode, profile_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_then_load_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("themes.json");
        let profile = Uuid::new_v4();

        let cache = FileThemeCache::new(&path);
        assert_eq!(cache.load(profile).await.unwrap(), None);
        cache.store(profile, ThemeMode::Dark).await.unwrap();

        let reopened = FileThemeCache::new(&path);
        assert_eq!(reopened.load(profile).await.unwrap(), Some(ThemeMode::Dark));
        assert_eq!(reopened.load(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("themes.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let cache = FileThemeCache::new(&path);
        let profile = Uuid::new_v4();
        assert_eq!(cache.load(profile).await.unwrap(), None);
        cache.store(profile, ThemeMode::Light).await.unwrap();
        assert_eq!(cache.load(profile).await.unwrap(), Some(ThemeMode::Light));
    }
}
