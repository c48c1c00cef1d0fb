//! # MenuQR Core
//!
//! Domain entities, repository traits (ports) and services for the MenuQR
//! digital menu: menu composition, drag-and-drop reordering, the diner-facing
//! renderer, promotions, settings and analytics.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
