//! # MenuQR Shared
//!
//! Shared configuration, telemetry, constants and small helpers used by every
//! MenuQR crate.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
