use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::page::models::PageId;
use crate::domain::page::models::VisitCount;
use crate::inbound::http::router::AppState;

pub async fn record_visit(
    State(state): State<AppState>,
    Json(body): Json<RecordVisitRequest>,
) -> Result<ApiSuccess<VisitResponseData>, ApiError> {
    state
        .page_service
        .record_visit(PageId(body.page_id))
        .await
        .map_err(ApiError::from)
        .map(|count| ApiSuccess::new(StatusCode::OK, count.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordVisitRequest {
    page_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitResponseData {
    pub page_id: i64,
    pub visits: i64,
}

impl From<VisitCount> for VisitResponseData {
    fn from(count: VisitCount) -> Self {
        Self {
            page_id: count.page_id.0,
            visits: count.visits,
        }
    }
}
