//! QR image rendering

pub mod qrserver;

pub use qrserver::QrServerRenderer;
