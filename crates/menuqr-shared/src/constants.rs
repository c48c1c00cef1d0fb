//! Application-wide constants

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
/// Minimum zxcvbn score (0-4) accepted for new passwords.
pub const MIN_PASSWORD_SCORE: u8 = 2;

pub const MAX_SPICE_LEVEL: u8 = 5;

pub const DEFAULT_QR_SIZE: u32 = 200;
pub const DEFAULT_QR_FOREGROUND: &str = "#000000";
pub const DEFAULT_QR_BACKGROUND: &str = "#FFFFFF";

pub const DEFAULT_SCAN_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_POPULAR_ITEMS_LIMIT: usize = 10;

pub const DEFAULT_BUSINESS_NAME: &str = "Restaurant Menu";
