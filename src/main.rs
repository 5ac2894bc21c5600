use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    routing::{get, put},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use city_population_service::api::handlers::{
    handle_get_city, handle_health, handle_panic, handle_upsert_city,
};
use city_population_service::api::protocol::{
    ENDPOINT_CITY, ENDPOINT_CITY_BY_NAME, ENDPOINT_HEALTH,
};
use city_population_service::config::{ServiceConfig, StoreBackend};
use city_population_service::storage::CityStore;
use city_population_service::storage::document::DocumentStore;
use city_population_service::storage::memory::MemoryStore;
use city_population_service::storage::relational::RelationalStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // 1. Configuration:
    let config = ServiceConfig::from_env()?;
    tracing::info!("Selected store backend: {:?}", config.backend);

    // 2. Storage adapter:
    let store: Arc<dyn CityStore> = match config.backend {
        StoreBackend::Relational => Arc::new(RelationalStore::new(config.relational.clone())),
        StoreBackend::DocumentIndex => Arc::new(DocumentStore::new(config.document.clone())),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    // Connection failure is non-fatal: /health keeps answering, store
    // operations fail until the backend comes back and we reconnect.
    if let Err(e) = store.connect().await {
        tracing::error!(
            "Failed to connect to store backend. Service may not function correctly: {}",
            e
        );
    }

    // 3. HTTP Router:
    let app = Router::new()
        .route(ENDPOINT_HEALTH, get(handle_health))
        .route(ENDPOINT_CITY, put(handle_upsert_city).post(handle_upsert_city))
        .route(ENDPOINT_CITY_BY_NAME, get(handle_get_city))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(Extension(store));

    // 4. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
