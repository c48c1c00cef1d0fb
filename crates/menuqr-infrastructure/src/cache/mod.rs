//! Local caches

pub mod theme_cache;

pub use theme_cache::FileThemeCache;
