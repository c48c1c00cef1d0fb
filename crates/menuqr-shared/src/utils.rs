//! Utility functions

use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid")
});

/// `#RRGGBB` check used for QR and theme colors.
pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR.is_match(s)
}

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        match local.chars().count() {
            0 => format!("***{}", domain),
            1 | 2 => format!("{}***{}", local.chars().next().unwrap_or('*'), domain),
            _ => format!("{}***{}", local.chars().take(2).collect::<String>(), domain),
        }
    } else {
        "***".to_string()
    }
}
