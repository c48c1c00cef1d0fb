// ============================================================================
// MenuQR Infrastructure - QR Code Repository
// File: crates/menuqr-infrastructure/src/backend/rest/qr_code_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use menuqr_core::domain::{NewQrCode, QrCode, QrCodeDraft};
use menuqr_core::error::DomainError;
use menuqr_core::repositories::{QrCodeRepository, Session};

use super::log_err;
use crate::backend::client::{eq, Auth, BackendClient};

const QR_CODES: &str = "qr_codes";

pub struct RestQrCodeRepository {
    client: BackendClient,
}

impl RestQrCodeRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QrCodeRepository for RestQrCodeRepository {
    async fn list(&self, session: &Session) -> Result<Vec<QrCode>, DomainError> {
        self.client
            .select(
                Auth::Session(session),
                QR_CODES,
                vec![
                    ("profile_id", eq(session.profile_id)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await
            .map_err(log_err("listing QR codes"))
    }

    async fn create(&self, session: &Session, qr_code: &NewQrCode) -> Result<QrCode, DomainError> {
        info!("Creating QR code: {}", qr_code.draft.name);
        self.client
            .insert(Auth::Session(session), QR_CODES, qr_code)
            .await
            .map_err(log_err("creating QR code"))
    }

    async fn update(&self, session: &Session, id: Uuid, draft: &QrCodeDraft) -> Result<QrCode, DomainError> {
        self.client
            .update(Auth::Session(session), QR_CODES, vec![("id", eq(id))], draft)
            .await
            .map_err(log_err("updating QR code"))
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting QR code: {}", id);
        self.client
            .delete(Auth::Session(session), QR_CODES, vec![("id", eq(id))])
            .await
            .map_err(log_err("deleting QR code"))
    }
}
