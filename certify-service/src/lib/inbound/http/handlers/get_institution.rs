use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::create_institution::InstitutionResponse;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::institution::models::InstitutionId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Visible to admins and to members of the institution itself.
pub async fn get_institution(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<InstitutionResponse>, ApiError> {
    let institution_id =
        InstitutionId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    require_admin_or_member(&user, &institution_id)?;

    state
        .institution_service
        .get(&institution_id)
        .await
        .map_err(ApiError::from)
        .map(|institution| ApiSuccess::new(StatusCode::OK, InstitutionResponse { institution }))
}

pub(super) fn require_admin_or_member(
    user: &AuthenticatedUser,
    institution_id: &InstitutionId,
) -> Result<(), ApiError> {
    if user.is_admin() || user.institution_id.as_ref() == Some(institution_id) {
        return Ok(());
    }
    Err(ApiError::Forbidden(
        "Not a member of this institution".to_string(),
    ))
}
