use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::UserProfile;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileResponse>, ApiError> {
    state
        .auth_service
        .get_profile(user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, ProfileResponse { user: profile }))
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}
