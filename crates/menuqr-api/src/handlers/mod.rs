//! HTTP handlers

pub mod analytics;
pub mod auth;
pub mod health;
pub mod menu;
pub mod promotions;
pub mod public;
pub mod qr;
pub mod settings;
