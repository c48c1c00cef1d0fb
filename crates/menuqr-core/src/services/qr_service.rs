// ============================================================================
// MenuQR Core - QR Code Service
// File: crates/menuqr-core/src/services/qr_service.rs
// ============================================================================

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use menuqr_security::Session;

use crate::domain::{NewQrCode, QrCode, QrCodeDraft};
use crate::error::DomainError;
use crate::repositories::{QrCodeRepository, QrImageRenderer};

/// A QR code with the URLs the owner needs to print it
#[derive(Debug, Clone, Serialize)]
pub struct QrCodeView {
    #[serde(flatten)]
    pub qr_code: QrCode,
    pub menu_url: String,
    pub image_url: String,
}

pub struct QrService<
    R: QrCodeRepository + ?Sized = dyn QrCodeRepository,
    G: QrImageRenderer + ?Sized = dyn QrImageRenderer,
> {
    repo: Arc<R>,
    renderer: Arc<G>,
    public_base_url: String,
    default_size: u32,
}

impl<R, G> QrService<R, G>
where
    R: QrCodeRepository + ?Sized,
    G: QrImageRenderer + ?Sized,
{
    pub fn new(repo: Arc<R>, renderer: Arc<G>, public_base_url: impl Into<String>, default_size: u32) -> Self {
        Self { repo, renderer, public_base_url: public_base_url.into(), default_size }
    }

    pub fn menu_url(&self, qr_code: &QrCode) -> String {
        qr_code.menu_url(&self.public_base_url)
    }

    pub fn image_url(&self, qr_code: &QrCode, size: Option<u32>) -> String {
        self.renderer.render_url(
            &self.menu_url(qr_code),
            size.unwrap_or(self.default_size),
            &qr_code.foreground_color,
            &qr_code.background_color,
        )
    }

    pub fn view(&self, qr_code: QrCode, size: Option<u32>) -> QrCodeView {
        QrCodeView {
            menu_url: self.menu_url(&qr_code),
            image_url: self.image_url(&qr_code, size),
            qr_code,
        }
    }

    pub async fn list(&self, session: &Session) -> Vec<QrCodeView> {
        match self.repo.list(session).await {
            Ok(codes) => codes.into_iter().map(|code| self.view(code, None)).collect(),
            Err(e) => {
                error!("Error fetching QR codes: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn create(&self, session: &Session, draft: QrCodeDraft) -> Result<Option<QrCodeView>, DomainError> {
        let draft = draft.normalized()?;
        let new = NewQrCode { profile_id: session.profile_id, draft };
        Ok(match self.repo.create(session, &new).await {
            Ok(created) => {
                info!("QR code created: {}", created.id);
                Some(self.view(created, None))
            }
            Err(e) => {
                error!("Error creating QR code: {}", e);
                None
            }
        })
    }

    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        draft: QrCodeDraft,
    ) -> Result<Option<QrCodeView>, DomainError> {
        let draft = draft.normalized()?;
        Ok(match self.repo.update(session, id, &draft).await {
            Ok(updated) => Some(self.view(updated, None)),
            Err(e) => {
                error!("Error updating QR code {}: {}", id, e);
                None
            }
        })
    }

    pub async fn delete(&self, session: &Session, id: Uuid) -> bool {
        match self.repo.delete(session, id).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error deleting QR code {}: {}", id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockQrCodeRepository, MockQrImageRenderer};
    use crate::services::test_support::session;
    use chrono::Utc;

    fn stored(new: &NewQrCode) -> QrCode {
        QrCode {
            id: Uuid::new_v4(),
            profile_id: new.profile_id,
            name: new.draft.name.clone(),
            description: new.draft.description.clone(),
            custom_path: new.draft.custom_path.clone(),
            foreground_color: new.draft.foreground_color.clone(),
            background_color: new.draft.background_color.clone(),
            logo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(custom_path: Option<&str>) -> QrCodeDraft {
        QrCodeDraft {
            name: "Table 4".into(),
            description: None,
            custom_path: custom_path.map(str::to_string),
            foreground_color: "#000000".into(),
            background_color: "#FFFFFF".into(),
            logo_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_builds_urls() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create().times(1).returning(|_, new| Ok(stored(new)));
        let mut renderer = MockQrImageRenderer::new();
        renderer.expect_render_url()
            .withf(|data, size, fg, bg| {
                data == "https://menuqr.app/menu/bistro" && *size == 200 && fg == "#000000" && bg == "#FFFFFF"
            })
            .times(1)
            .returning(|_, _, _, _| "https://qr.example/png".to_string());

        let service = QrService::new(Arc::new(repo), Arc::new(renderer), "https://menuqr.app/", 200);
        let view = service.create(&session(), draft(Some("/Bistro/"))).await.unwrap().unwrap();
        assert_eq!(view.menu_url, "https://menuqr.app/menu/bistro");
        assert_eq!(view.image_url, "https://qr.example/png");
    }

    #[tokio::test]
    async fn test_invalid_draft_rejected() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create().never();
        let service = QrService::new(Arc::new(repo), Arc::new(MockQrImageRenderer::new()), "https://menuqr.app", 200);

        let mut bad = draft(None);
        bad.foreground_color = "black".into();
        assert!(service.create(&session(), bad).await.is_err());
    }

    #[tokio::test]
    async fn test_list_failure_is_empty() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_list().returning(|_| Err(DomainError::BackendError("down".into())));
        let service = QrService::new(Arc::new(repo), Arc::new(MockQrImageRenderer::new()), "https://menuqr.app", 200);
        assert!(service.list(&session()).await.is_empty());
    }
}
