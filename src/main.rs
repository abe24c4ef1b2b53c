//! Local Library Server - catalog web application
//!
//! Serves the server-rendered catalog pages backed by PostgreSQL.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use local_library_server::{
    api,
    config::AppConfig,
    repository::{InMemoryMessageStore, Repository},
    services::Services,
    views::html::HtmlRenderer,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("local_library_server={},tower_http=debug", config.logging.level).into()
    });

    let (json_layer, pretty_layer) = if config.logging.format == "json" {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!("Starting Local Library Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    // Create repository, services and renderer
    let repository = Repository::new(pool);
    let services = Services::new(repository, Arc::new(InMemoryMessageStore::seeded()));

    let state = AppState {
        services: Arc::new(services),
        views: Arc::new(HtmlRenderer::new(&config.views)),
    };

    // Build router
    let app = api::router(state);

    // Start server
    let host = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid host address: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
