pub mod analytics;
pub mod category;
pub mod language;
pub mod menu_item;
pub mod ordering;
pub mod profile;
pub mod promotion;
pub mod public_menu;
pub mod qr_code;
pub mod rating;
pub mod settings;
pub mod theme;
pub mod view;

pub use analytics::{DailyMenuScan, DashboardStats, MenuItemView, MenuView, MenuViewMetadata, NewMenuView, PopularMenuItem};
pub use category::{Category, CategoryDraft, NewCategory};
pub use language::Language;
pub use menu_item::{
    display_price, format_price, DietaryBadge, MenuItem, MenuItemDraft, MenuItemRecord, NewMenuItem, PriceVariation,
};
pub use ordering::{OrderUpdate, Orderable};
pub use profile::{AuthGrant, AuthTokens, LoginCredentials, Profile, ProfileUpdate, SignUpCredentials};
pub use promotion::{
    DiscountType, Promotion, PromotionDraft, PromotionItemLink, PromotionRecord, PromotionStatus, PromotionWithItems,
};
pub use public_menu::{decode_rows, BusinessInfo, DecodedPublicMenu, PublicCategory, PublicItem, PublicMenuRow};
pub use qr_code::{NewQrCode, QrCode, QrCodeDraft};
pub use rating::{MenuItemRating, NewRating, RatingSummary, Star};
pub use settings::{NewUserSettings, SettingsUpdate, ThemeMode, UserSettings};
pub use theme::{LogoPosition, ThemeSettings};
pub use view::{CategoryView, EmptyCategoryPolicy, ItemView, PublicMenu, UnknownPolicy, VariationView};
