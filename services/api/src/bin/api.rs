//! services/api/src/bin/api.rs

use api_lib::{
    bootstrap::{init_tracing, open_store},
    config::Config,
    error::ApiError,
    web::{router, AppState},
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    init_tracing(config.log_level);
    info!("Configuration loaded. Starting server...");

    // --- 2. Load Catalog & History (restoring from backup if needed) ---
    info!(data_dir = %config.data_dir.display(), "Opening fortune history...");
    let store = open_store(&config);
    info!(
        fortunes = store.catalog().len(),
        entries = store.state().history.len(),
        "Fortune history ready."
    );

    // --- 3. Build the Shared AppState & Router ---
    let app = router(Arc::new(AppState::new(store)));

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
