use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponse;
use crate::domain::institution::models::InstitutionId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_institution(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let institution_id =
        InstitutionId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .institution_service
        .delete(&institution_id)
        .await
        .map_err(ApiError::from)
        .map(|()| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageResponse {
                    message: "Institution deleted".to_string(),
                },
            )
        })
}
