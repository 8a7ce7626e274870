use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::client_info;
use super::get_profile::ProfileResponse;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn verify_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<VerifyEmailRequest>,
) -> Result<ApiSuccess<ProfileResponse>, ApiError> {
    let client = client_info(&headers);

    state
        .auth_service
        .verify_email(&body.token, client)
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, ProfileResponse { user: profile }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailRequest {
    token: String,
}
