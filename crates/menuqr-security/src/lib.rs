//! # MenuQR Security
//!
//! Session context, access-token decoding and password policy.

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtError, TokenDecoder};
pub use password::{PasswordError, PasswordPolicy};
pub use session::{Session, SessionError};
