use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// OAuth2 password grant. Answers with the bare token body, not the usual envelope.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let result = state
        .user_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(TokenResponse {
        access_token: result.access_token,
        token_type: result.token_type.to_string(),
    }))
}

/// `username` carries the email address. Extra OAuth2 fields such as
/// `grant_type` and `scope` are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
