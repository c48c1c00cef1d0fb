//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendSettings,
    pub qr: QrSettings,
    pub menu: MenuSettings,
    pub log: LogSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Origin used when building the diner-facing menu URL encoded in QR codes.
    pub public_base_url: String,
    pub cors_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub url: String,
    pub anon_key: String,
    /// HS256 secret of the backend auth service. Without it session tokens are
    /// decoded but their signature is not checked.
    pub jwt_secret: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QrSettings {
    pub render_base_url: String,
    pub default_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuSettings {
    /// `show` or `hide`: whether diners see categories that have no items.
    pub public_empty_categories: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    pub theme_cache_path: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Ok(Self::builder(&env)?.build()?.try_deserialize()?)
    }

    fn builder(env: &str) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menuqr-server")?
            .set_default("app.public_base_url", "https://menuqr.com")?
            .set_default("app.cors_origin", "http://localhost:5173")?
            .set_default("backend.timeout_seconds", 15)?
            .set_default("qr.render_base_url", "https://api.qrserver.com/v1/create-qr-code/")?
            .set_default("qr.default_size", crate::constants::DEFAULT_QR_SIZE)?
            .set_default("menu.public_empty_categories", "hide")?
            .set_default("log.level", "info")?
            .set_default("log.json", true)?
            .set_default("cache.theme_cache_path", "data/theme-preferences.json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .set_override("backend.url", "http://localhost:54321")
            .unwrap()
            .set_override("backend.anon_key", "anon")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.qr.default_size, 200);
        assert_eq!(config.menu.public_empty_categories, "hide");
        assert!(config.backend.jwt_secret.is_none());
        assert!(config.log.dir.is_none());
    }
}
