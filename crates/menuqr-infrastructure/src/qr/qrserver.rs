// ============================================================================
// MenuQR Infrastructure - QR Image Renderer
// File: crates/menuqr-infrastructure/src/qr/qrserver.rs
// ============================================================================
//! Builds image URLs for a hosted QR generator (qrserver-style API). The
//! image itself is fetched by the client.

use reqwest::Url;

use menuqr_core::repositories::QrImageRenderer;

use crate::backend::BackendError;

#[derive(Debug, Clone)]
pub struct QrServerRenderer {
    base_url: Url,
}

impl QrServerRenderer {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url).map_err(|e| BackendError::Config(format!("qr.render_base_url: {}", e)))?;
        Ok(Self { base_url })
    }
}

impl QrImageRenderer for QrServerRenderer {
    fn render_url(&self, data: &str, size: u32, foreground: &str, background: &str) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("data", data)
            .append_pair("size", &format!("{}x{}", size, size))
            .append_pair("color", foreground.trim_start_matches('#'))
            .append_pair("bgcolor", background.trim_start_matches('#'));
        url.into()
    }
}
