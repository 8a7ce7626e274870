use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::client_info;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::LoginResult;
use crate::domain::auth::models::UserProfile;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponse>, ApiError> {
    let client = client_info(&headers);

    state
        .auth_service
        .login(&body.email, &body.password, client)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: result.user,
            access_token: result.tokens.access_token,
            refresh_token: result.tokens.refresh_token,
        }
    }
}
