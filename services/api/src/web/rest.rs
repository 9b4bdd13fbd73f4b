//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    FortunePayload, GenerateResponse, HistoryResponse, StatsResponse, TodayResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use daily_fortune_core::FortuneError;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        today_handler,
        generate_handler,
        stats_handler,
        history_handler,
        fortune_by_date_handler,
    ),
    components(
        schemas(FortunePayload, TodayResponse, GenerateResponse, StatsResponse, HistoryResponse)
    ),
    tags(
        (name = "Daily Fortune API", description = "One fortune per day, with history and streaks.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Today's fortune, if it has been generated, and whether one can be generated now.
#[utoipa::path(
    get,
    path = "/api/fortune",
    responses(
        (status = 200, description = "Today's fortune state", body = TodayResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn today_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<TodayResponse>, (StatusCode, String)> {
    let (fortune, can_generate) = app_state
        .with_store(|store| (store.get_today(), store.can_generate()))
        .await?;

    Ok(Json(TodayResponse {
        fortune: fortune.map(FortunePayload::from),
        can_generate,
    }))
}

/// Generate today's fortune.
///
/// Only one fortune can be generated per calendar day; later calls on the
/// same day are rejected with 409.
#[utoipa::path(
    get,
    path = "/api/generate",
    responses(
        (status = 200, description = "Fortune generated", body = GenerateResponse),
        (status = 409, description = "Fortune already generated today", body = GenerateResponse),
        (status = 500, description = "Internal server error", body = GenerateResponse)
    )
)]
pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
) -> (StatusCode, Json<GenerateResponse>) {
    match app_state.with_store(|store| store.generate()).await {
        Ok(Ok(fortune)) => {
            info!(fortune_id = fortune.id, "Served new fortune");
            (StatusCode::OK, Json(GenerateResponse::generated(fortune)))
        }
        Ok(Err(e @ FortuneError::AlreadyGenerated(_))) => (
            StatusCode::CONFLICT,
            Json(GenerateResponse::rejected(e.to_string())),
        ),
        Ok(Err(e)) => {
            error!("Failed to generate fortune: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateResponse::rejected(e.to_string())),
            )
        }
        Err((status, message)) => (status, Json(GenerateResponse::rejected(message))),
    }
}

/// Totals, the current streak, and the first and latest fortune dates.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Fortune statistics", body = StatsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn stats_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let stats = app_state.with_store(|store| store.get_stats()).await?;
    Ok(Json(stats.into()))
}

/// All dates that have a recorded fortune, most recent first.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Dates with a fortune", body = HistoryResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn history_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<HistoryResponse>, (StatusCode, String)> {
    let dates = app_state
        .with_store(|store| store.list_available_dates())
        .await?;
    Ok(Json(HistoryResponse { dates }))
}

/// The fortune recorded on a given date.
#[utoipa::path(
    get,
    path = "/api/history/{date}",
    responses(
        (status = 200, description = "The fortune for that date", body = FortunePayload),
        (status = 400, description = "Date is not in YYYY-MM-DD format"),
        (status = 404, description = "No fortune recorded for that date"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("date" = String, Path, description = "Calendar date as YYYY-MM-DD.")
    )
)]
pub async fn fortune_by_date_handler(
    State(app_state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<FortunePayload>, (StatusCode, String)> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid date '{}', expected YYYY-MM-DD", date),
        )
    })?;

    app_state
        .with_store(move |store| store.get_by_date(date))
        .await?
        .map(|fortune| Json(fortune.into()))
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("No fortune recorded for {}", date),
            )
        })
}
