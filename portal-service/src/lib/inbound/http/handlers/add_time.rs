use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::page::models::PageId;
use crate::domain::page::models::TimeSpent;
use crate::inbound::http::router::AppState;

pub async fn add_time(
    State(state): State<AppState>,
    Json(body): Json<AddTimeRequest>,
) -> Result<ApiSuccess<TimeResponseData>, ApiError> {
    state
        .page_service
        .add_time(PageId(body.page_id), body.seconds)
        .await
        .map_err(ApiError::from)
        .map(|spent| ApiSuccess::new(StatusCode::OK, spent.into()))
}

/// `seconds` may be absent or null; the service answers that with a 400.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddTimeRequest {
    page_id: i64,
    #[serde(default)]
    seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeResponseData {
    pub page_id: i64,
    pub total_time_seconds: i64,
}

impl From<TimeSpent> for TimeResponseData {
    fn from(spent: TimeSpent) -> Self {
        Self {
            page_id: spent.page_id.0,
            total_time_seconds: spent.total_time_seconds,
        }
    }
}
