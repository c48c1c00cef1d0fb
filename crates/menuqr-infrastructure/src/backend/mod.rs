//! Backend-as-a-service adapters (REST tables, RPC functions, auth)

pub mod client;
pub mod error;
pub mod rest;

pub use client::{Auth, BackendClient};
pub use error::BackendError;
pub use rest::{
    RestAccountRepository, RestAnalyticsRepository, RestLanguageRepository, RestMenuRepository,
    RestPromotionRepository, RestQrCodeRepository, RestRatingRepository, RestSettingsRepository,
};
