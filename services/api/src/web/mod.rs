pub mod protocol;
pub mod rest;
pub mod state;

use crate::adapters::json_file::write_json_atomic;
use crate::error::ApiError;
use axum::{http::Method, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use rest::{
    fortune_by_date_handler, generate_handler, history_handler, stats_handler, today_handler,
    ApiDoc,
};
pub use state::AppState;

/// Builds the complete application: the JSON API plus the Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let api_router = Router::new()
        .route("/api/fortune", get(today_handler))
        .route("/api/generate", get(generate_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/history", get(history_handler))
        .route("/api/history/{date}", get(fortune_by_date_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Writes the OpenAPI document for the JSON API to `path`.
pub fn write_openapi(path: &Path) -> Result<(), ApiError> {
    write_json_atomic(path, &ApiDoc::openapi())?;
    Ok(())
}
