use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::create_institution::InstitutionResponse;
use super::get_institution::require_admin_or_member;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::institution::errors::InstitutionError;
use crate::domain::institution::models::InstitutionId;
use crate::domain::institution::models::InstitutionStatus;
use crate::domain::institution::models::Slug;
use crate::domain::institution::models::UpdateInstitutionCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_institution(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateInstitutionRequest>,
) -> Result<ApiSuccess<InstitutionResponse>, ApiError> {
    let institution_id =
        InstitutionId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    require_admin_or_member(&user, &institution_id)?;

    // Only admins may flip the verification status.
    if body.status.is_some() && !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .institution_service
        .update(&institution_id, command)
        .await
        .map_err(ApiError::from)
        .map(|institution| ApiSuccess::new(StatusCode::OK, InstitutionResponse { institution }))
}

/// HTTP request body for a partial institution update (raw JSON)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstitutionRequest {
    slug: Option<String>,
    name: Option<String>,
    registration_number: Option<String>,
    contact_email: Option<String>,
    website: Option<String>,
    city: Option<String>,
    country: Option<String>,
    status: Option<String>,
}

impl UpdateInstitutionRequest {
    fn try_into_command(self) -> Result<UpdateInstitutionCommand, InstitutionError> {
        let slug = self.slug.map(Slug::new).transpose()?;

        let status = self
            .status
            .as_deref()
            .map(|s| {
                InstitutionStatus::parse(s).ok_or_else(|| {
                    InstitutionError::Validation(format!("Unknown institution status: {}", s))
                })
            })
            .transpose()?;

        Ok(UpdateInstitutionCommand {
            slug,
            name: self.name,
            registration_number: self.registration_number,
            contact_email: self.contact_email,
            website: self.website,
            city: self.city,
            country: self.country,
            status,
        })
    }
}
