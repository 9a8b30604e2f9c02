use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Post;
use crate::inbound::http::router::AppState;

pub async fn get_posts(State(state): State<AppState>) -> Result<ApiSuccess<Vec<Post>>, ApiError> {
    state
        .post_source
        .fetch_posts()
        .await
        .map_err(ApiError::from)
        .map(|posts| ApiSuccess::new(StatusCode::OK, posts))
}
