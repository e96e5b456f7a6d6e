//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use padel_common::{AppConfig, AppError, AppResult, JwtService, StorageBackend};
use padel_core::traits::MatchStore;
use padel_db::{apply_schema, create_pool, MemoryMatchStore, PgMatchStore};
use padel_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns a configuration error when the middleware cannot be built
pub fn create_app(state: AppState) -> AppResult<Router> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Open the configured match store
async fn open_store(config: &AppConfig) -> AppResult<Arc<dyn MatchStore>> {
    match config.storage {
        StorageBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryMatchStore::new()))
        }
        StorageBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required for the postgres backend".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let db_config = padel_db::DatabaseConfig::new(database.url.clone())
                .with_pool_size(database.min_connections, database.max_connections);
            let pool = create_pool(&db_config).await.map_err(AppError::storage)?;
            info!("PostgreSQL connection established");

            if database.auto_migrate {
                apply_schema(&pool).await.map_err(AppError::storage)?;
            }

            Ok(Arc::new(PgMatchStore::new(pool)))
        }
    }
}

/// Initialize all dependencies and create AppState
///
/// # Errors
/// Returns an error when the store cannot be opened or the context is incomplete
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let store = open_store(&config).await?;
    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.leeway_seconds));

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .jwt_service(jwt_service)
        .base_url(config.links.base_url.clone())
        .invitation_ttl_hours(config.links.invitation_ttl_hours)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
///
/// # Errors
/// Returns an error when the listener cannot bind or the server stops abnormally
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
///
/// # Errors
/// Returns an error when startup fails
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
