use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_profile::ProfileResponse;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::UpdateProfileCommand;
use crate::domain::institution::models::InstitutionId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<ProfileResponse>, ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .update_profile(user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|profile| ApiSuccess::new(StatusCode::OK, ProfileResponse { user: profile }))
}

/// HTTP request body for a partial profile update (raw JSON)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    institution_id: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, AuthError> {
        let institution_id = self
            .institution_id
            .as_deref()
            .map(InstitutionId::from_string)
            .transpose()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        Ok(UpdateProfileCommand {
            first_name: self.first_name,
            last_name: self.last_name,
            institution_id,
        })
    }
}
