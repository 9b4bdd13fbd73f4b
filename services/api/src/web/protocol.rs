//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads the API server sends to the browser client.
//! All endpoints are GET requests, so there are no client-to-server messages.

use chrono::{NaiveDate, NaiveDateTime};
use daily_fortune_core::{DailyFortune, FortuneStats};
use serde::Serialize;
use utoipa::ToSchema;

/// A fortune together with the moment it was generated.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FortunePayload {
    pub id: i64,
    pub text: String,
    pub category: String,
    pub generated_at: NaiveDateTime,
}

impl From<DailyFortune> for FortunePayload {
    fn from(fortune: DailyFortune) -> Self {
        Self {
            id: fortune.id,
            text: fortune.text,
            category: fortune.category,
            generated_at: fortune.generated_at,
        }
    }
}

/// Today's fortune, if any, and whether one can still be generated.
#[derive(Serialize, Debug, ToSchema)]
pub struct TodayResponse {
    pub fortune: Option<FortunePayload>,
    pub can_generate: bool,
}

/// The outcome of a generate request.
#[derive(Serialize, Debug, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fortune: Option<FortunePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn generated(fortune: DailyFortune) -> Self {
        Self {
            success: true,
            fortune: Some(fortune.into()),
            error: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            fortune: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct StatsResponse {
    pub total_fortunes: usize,
    pub streak: u32,
    pub first_fortune: Option<NaiveDate>,
    pub last_fortune: Option<NaiveDate>,
}

impl From<FortuneStats> for StatsResponse {
    fn from(stats: FortuneStats) -> Self {
        Self {
            total_fortunes: stats.total_fortunes,
            streak: stats.streak,
            first_fortune: stats.first_fortune_date,
            last_fortune: stats.last_fortune_date,
        }
    }
}

/// Dates with a recorded fortune, most recent first.
#[derive(Serialize, Debug, ToSchema)]
pub struct HistoryResponse {
    pub dates: Vec<NaiveDate>,
}
