use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PageData;
use crate::domain::page::models::PageName;
use crate::inbound::http::router::AppState;
use crate::page::errors::PageError;

pub async fn create_page(
    State(state): State<AppState>,
    Json(body): Json<CreatePageRequest>,
) -> Result<ApiSuccess<PageData>, ApiError> {
    let name = PageName::new(body.name).map_err(PageError::from)?;

    state
        .page_service
        .create_page(name)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::CREATED, page.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePageRequest {
    name: String,
}
