//! services/api/src/bin/purchase_api.rs

use axum::http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use purchase_api_lib::{
    adapters::ScriptCollectionAdapter,
    config::Config,
    error::ApiError,
    web::{
        self,
        rest::PAGE_SESSION_HEADER,
        state::{AppState, PageSessions},
    },
};
use purchase_core::ports::SystemClock;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Collection Endpoint Adapter ---
    let http_client = reqwest::Client::builder().build()?;
    let collection_adapter = Arc::new(ScriptCollectionAdapter::new(
        http_client,
        config.collection_endpoint_url.clone(),
    ));
    info!(
        url = %config.collection_endpoint_url,
        "Orders will be forwarded to the collection endpoint."
    );

    // --- 3. Build the Shared AppState ---
    let clock = Arc::new(SystemClock);
    let sessions = Arc::new(PageSessions::new(collection_adapter, clock.clone()));
    let app_state = Arc::new(AppState {
        config: config.clone(),
        clock,
        sessions,
    });

    // --- 4. Create the Web Router ---
    let allowed_origin = config.allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid ALLOWED_ORIGIN '{}': {}",
            config.allowed_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static(PAGE_SESSION_HEADER),
        ]);

    let app = web::router(app_state).layer(cors);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
