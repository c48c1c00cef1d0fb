//! Password policy checked before any call to the auth backend.

use menuqr_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, MIN_PASSWORD_SCORE};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters")]
    TooShort,
    #[error("Password must be at most 128 characters")]
    TooLong,
    #[error("Password is too weak")]
    TooWeak,
}

pub struct PasswordPolicy;

impl PasswordPolicy {
    pub fn check(password: &str, user_inputs: &[&str]) -> Result<(), PasswordError> {
        let length = password.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordError::TooLong);
        }

        let entropy = zxcvbn::zxcvbn(password, user_inputs);
        if u8::from(entropy.score()) < MIN_PASSWORD_SCORE {
            return Err(PasswordError::TooWeak);
        }
        Ok(())
    }
}
