//! Menu languages offered to diners

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    fn new(code: &str, name: &str) -> Self {
        Self { code: code.to_string(), name: name.to_string() }
    }

    /// Used when the language table cannot be read.
    pub fn fallback() -> Vec<Language> {
        vec![
            Language::new("en", "English"),
            Language::new("es", "Spanish"),
            Language::new("fr", "French"),
        ]
    }

    /// Display name for a code, defaulting to English.
    pub fn name_for<'a>(languages: &'a [Language], code: &str) -> &'a str {
        languages
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.name.as_str())
            .unwrap_or("English")
    }
}
