//! # MenuQR API
//!
//! HTTP surface over the core services: owner dashboard endpoints behind a
//! bearer session and the public, diner-facing menu endpoints.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiOptions, AppState, Repositories};
