use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::page::models::KpiReport;
use crate::inbound::http::router::AppState;

pub async fn list_kpis(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<KpiResponseData>>, ApiError> {
    state
        .page_service
        .list_kpis()
        .await
        .map_err(ApiError::from)
        .map(|reports| {
            ApiSuccess::new(
                StatusCode::OK,
                reports.iter().map(KpiResponseData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiResponseData {
    pub page_id: i64,
    pub page_name: String,
    pub visits: i64,
    pub total_time_seconds: i64,
}

impl From<&KpiReport> for KpiResponseData {
    fn from(report: &KpiReport) -> Self {
        Self {
            page_id: report.page_id.0,
            page_name: report.page_name.clone(),
            visits: report.visits,
            total_time_seconds: report.total_time_seconds,
        }
    }
}
