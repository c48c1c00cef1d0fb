//! Repository adapters over the backend REST API

pub mod account_repo_impl;
pub mod analytics_repo_impl;
pub mod catalog_repo_impl;
pub mod menu_repo_impl;
pub mod promotion_repo_impl;
pub mod qr_code_repo_impl;
pub mod settings_repo_impl;

pub use account_repo_impl::RestAccountRepository;
pub use analytics_repo_impl::RestAnalyticsRepository;
pub use catalog_repo_impl::{RestLanguageRepository, RestRatingRepository};
pub use menu_repo_impl::RestMenuRepository;
pub use promotion_repo_impl::RestPromotionRepository;
pub use qr_code_repo_impl::RestQrCodeRepository;
pub use settings_repo_impl::RestSettingsRepository;

use tracing::error;

use menuqr_core::error::DomainError;

use super::error::BackendError;

/// Logs a backend failure with context and converts it for the domain layer.
pub(crate) fn log_err(context: &'static str) -> impl Fn(BackendError) -> DomainError {
    move |e| {
        error!("Backend error {}: {}", context, e);
        DomainError::from(e)
    }
}
