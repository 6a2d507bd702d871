use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

use adapters::{
    HttpDeliveryClient, PgHostDirectory, PgMessageLogRepository, PgRegistryCache,
    PgWebhookRepository,
};
use application::{DispatchConfig, DispatchService, RegistryService};
use config::AppConfig;

/// Type aliases for application services with concrete adapter implementations
pub type AppRegistryService = RegistryService<PgWebhookRepository, PgRegistryCache, PgHostDirectory>;
pub type AppDispatchService =
    DispatchService<PgRegistryCache, PgMessageLogRepository, HttpDeliveryClient, PgHostDirectory>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub registry: Arc<AppRegistryService>,
    pub dispatcher: Arc<AppDispatchService>,
    pub config: AppConfig,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Forumcord relay initializing");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize adapters and application services
    let webhook_repo = Arc::new(PgWebhookRepository::new(pool.clone()));
    let message_log = Arc::new(PgMessageLogRepository::new(pool.clone()));
    let cache = Arc::new(PgRegistryCache::new(pool.clone()));
    let host = Arc::new(PgHostDirectory::new(pool.clone(), config.warning_max));
    let delivery = Arc::new(HttpDeliveryClient::new());

    let registry = Arc::new(RegistryService::new(
        webhook_repo,
        cache.clone(),
        host.clone(),
    ));
    let dispatcher = Arc::new(DispatchService::new(
        cache,
        message_log,
        delivery,
        host,
        DispatchConfig {
            board_url: config.board_url.clone(),
        },
    ));

    // Cold start: the dispatcher only ever reads the snapshot
    let targets = registry.rebuild().await?;
    tracing::info!(targets, "Registry snapshot ready");

    let state = AppState {
        pool,
        registry,
        dispatcher,
        config: config.clone(),
    };

    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::webhook::router())
        .merge(routes::event::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Forumcord relay listening");
    axum::serve(listener, router).await?;

    Ok(())
}
