//! QR code repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::{NewQrCode, QrCode, QrCodeDraft};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait QrCodeRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, session: &Session) -> Result<Vec<QrCode>, DomainError>;
    async fn create(&self, session: &Session, qr_code: &NewQrCode) -> Result<QrCode, DomainError>;
    async fn update(&self, session: &Session, id: Uuid, draft: &QrCodeDraft) -> Result<QrCode, DomainError>;
    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), DomainError>;
}

/// Builds the request URL of the external QR image service.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait QrImageRenderer: Send + Sync {
    fn render_url(&self, data: &str, size: u32, foreground: &str, background: &str) -> String;
}
