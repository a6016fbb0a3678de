//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `catalog::CatalogError` and `kernel::error::AppError`.

mod config;

use axum::{
    Router,
    http::{Method, header},
};
use catalog::domain::repository::SessionRepository;
use catalog::models::{User, UserName, UserRole};
use catalog::{
    CatalogConfig, InMemoryCatalogRepository, PgCatalogRepository, catalog_router,
    catalog_router_generic,
};
use platform::password::ClearTextPassword;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let catalog = match &config.database_url {
        Some(database_url) => postgres_catalog(database_url, config.catalog.clone()).await?,
        None => memory_catalog(config.dev_seed_password.as_deref(), config.catalog.clone()).await?,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = catalog
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn postgres_catalog(database_url: &str, config: CatalogConfig) -> anyhow::Result<Router> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = PgCatalogRepository::new(pool);

    // Startup cleanup: remove expired sessions
    // Errors here should not prevent server startup
    if let Err(e) = repo.cleanup_expired().await {
        tracing::warn!(
            error = %e,
            "Catalog session cleanup failed, continuing anyway"
        );
    }

    Ok(catalog_router(repo, config))
}

async fn memory_catalog(seed_password: Option<&str>, config: CatalogConfig) -> anyhow::Result<Router> {
    tracing::warn!("DATABASE_URL not set, using the in-memory store");

    let repo = InMemoryCatalogRepository::new();

    if let Some(password) = seed_password {
        let hash = ClearTextPassword::new_validated(password.to_string())?
            .hash(config.pepper())?;

        for (name, role) in [("user", UserRole::User), ("admin", UserRole::Admin)] {
            repo.insert_user(User::new(UserName::new(name)?, hash.clone(), role))
                .await;
            tracing::info!(user_name = name, user_role = %role, "Seeded development user");
        }
    }

    Ok(catalog_router_generic(repo, config))
}
