//! # MenuQR Infrastructure
//!
//! Adapters behind the core repository ports: the REST/RPC/auth backend,
//! the QR image service and the local theme preference cache.

pub mod backend;
pub mod cache;
pub mod qr;

pub use backend::{
    BackendClient, BackendError, RestAccountRepository, RestAnalyticsRepository, RestLanguageRepository,
    RestMenuRepository, RestPromotionRepository, RestQrCodeRepository, RestRatingRepository,
    RestSettingsRepository,
};
pub use cache::FileThemeCache;
pub use qr::QrServerRenderer;
