use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

use menuqr_api::{create_router, ApiOptions, AppState, Repositories};
use menuqr_core::domain::EmptyCategoryPolicy;
use menuqr_infrastructure::{
    BackendClient, FileThemeCache, QrServerRenderer, RestAccountRepository, RestAnalyticsRepository,
    RestLanguageRepository, RestMenuRepository, RestPromotionRepository, RestQrCodeRepository, RestRatingRepository,
    RestSettingsRepository,
};
use menuqr_security::TokenDecoder;
use menuqr_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Held until shutdown so buffered file logs are flushed.
    let _log_guard = menuqr_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    let backend = BackendClient::new(&config.backend)?;
    info!("Backend at {}", config.backend.url);
    if config.backend.jwt_secret.is_none() {
        warn!("backend.jwt_secret not set; session token signatures are not verified locally");
    }

    let public_empty_categories: EmptyCategoryPolicy = config
        .menu
        .public_empty_categories
        .parse()
        .context("invalid menu.public_empty_categories")?;

    let repos = Repositories {
        menu: Arc::new(RestMenuRepository::new(backend.clone())),
        qr_codes: Arc::new(RestQrCodeRepository::new(backend.clone())),
        qr_renderer: Arc::new(QrServerRenderer::new(&config.qr.render_base_url)?),
        promotions: Arc::new(RestPromotionRepository::new(backend.clone())),
        accounts: Arc::new(RestAccountRepository::new(backend.clone())),
        settings: Arc::new(RestSettingsRepository::new(backend.clone())),
        theme_cache: Arc::new(FileThemeCache::new(&config.cache.theme_cache_path)),
        analytics: Arc::new(RestAnalyticsRepository::new(backend.clone())),
        ratings: Arc::new(RestRatingRepository::new(backend.clone())),
        languages: Arc::new(RestLanguageRepository::new(backend)),
    };
    let options = ApiOptions {
        public_base_url: config.app.public_base_url.clone(),
        qr_default_size: config.qr.default_size,
        public_empty_categories,
    };
    let decoder = Arc::new(TokenDecoder::new(config.backend.jwt_secret.clone()));
    let state = AppState::new(repos, decoder, options);

    let cors_origin: HeaderValue = config
        .app
        .cors_origin
        .parse()
        .with_context(|| format!("invalid app.cors_origin `{}`", config.app.cors_origin))?;

    // Build router
    let app = create_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.backend.timeout_seconds + 5),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
