use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::PageData;
use crate::domain::page::models::PageId;
use crate::inbound::http::router::AppState;

pub async fn get_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<ApiSuccess<PageData>, ApiError> {
    let page_id = page_id
        .parse::<i64>()
        .map(PageId)
        .map_err(|_| ApiError::UnprocessableEntity(format!("Invalid page id: {page_id}")))?;

    state
        .page_service
        .get_page(page_id)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}
