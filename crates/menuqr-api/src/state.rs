//! Shared application state

use std::sync::Arc;

use menuqr_core::domain::EmptyCategoryPolicy;
use menuqr_core::repositories::{
    AccountRepository, AnalyticsRepository, LanguageRepository, MenuRepository, PromotionRepository,
    QrCodeRepository, QrImageRenderer, RatingRepository, SettingsRepository, ThemePreferenceCache,
};
use menuqr_core::services::{
    AccountService, AnalyticsService, LanguageService, MenuService, PromotionService, QrService, RatingService,
    ReorderCoordinator, SettingsService,
};
use menuqr_security::TokenDecoder;

/// Adapters the services are built on.
pub struct Repositories {
    pub menu: Arc<dyn MenuRepository>,
    pub qr_codes: Arc<dyn QrCodeRepository>,
    pub qr_renderer: Arc<dyn QrImageRenderer>,
    pub promotions: Arc<dyn PromotionRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub theme_cache: Arc<dyn ThemePreferenceCache>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub languages: Arc<dyn LanguageRepository>,
}

#[derive(Debug, Clone)]
pub struct ApiOptions {
    pub public_base_url: String,
    pub qr_default_size: u32,
    pub public_empty_categories: EmptyCategoryPolicy,
}

#[derive(Clone)]
pub struct AppState {
    pub decoder: Arc<TokenDecoder>,
    pub menu: Arc<MenuService>,
    pub reorder: Arc<ReorderCoordinator>,
    pub qr: Arc<QrService>,
    pub promotions: Arc<PromotionService>,
    pub accounts: Arc<AccountService>,
    pub settings: Arc<SettingsService>,
    pub analytics: Arc<AnalyticsService>,
    pub ratings: Arc<RatingService>,
    pub languages: Arc<LanguageService>,
}

impl AppState {
    pub fn new(repos: Repositories, decoder: Arc<TokenDecoder>, options: ApiOptions) -> Self {
        Self {
            menu: Arc::new(MenuService::new(repos.menu.clone(), options.public_empty_categories)),
            reorder: Arc::new(ReorderCoordinator::new(repos.menu)),
            qr: Arc::new(QrService::new(
                repos.qr_codes,
                repos.qr_renderer,
                options.public_base_url,
                options.qr_default_size,
            )),
            promotions: Arc::new(PromotionService::new(repos.promotions)),
            accounts: Arc::new(AccountService::new(repos.accounts, decoder.clone())),
            settings: Arc::new(SettingsService::new(repos.settings, repos.theme_cache)),
            analytics: Arc::new(AnalyticsService::new(repos.analytics)),
            ratings: Arc::new(RatingService::new(repos.ratings)),
            languages: Arc::new(LanguageService::new(repos.languages)),
            decoder,
        }
    }
}
