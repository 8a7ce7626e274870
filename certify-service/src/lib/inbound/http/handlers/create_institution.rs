use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::institution::errors::InstitutionError;
use crate::domain::institution::models::CreateInstitutionCommand;
use crate::domain::institution::models::Institution;
use crate::domain::institution::models::Slug;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_institution(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateInstitutionRequest>,
) -> Result<ApiSuccess<InstitutionResponse>, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .institution_service
        .create(command)
        .await
        .map_err(ApiError::from)
        .map(|institution| {
            ApiSuccess::new(StatusCode::CREATED, InstitutionResponse { institution })
        })
}

/// HTTP request body for registering an institution (raw JSON)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstitutionRequest {
    slug: String,
    name: String,
    registration_number: Option<String>,
    contact_email: Option<String>,
    website: Option<String>,
    city: Option<String>,
    country: Option<String>,
}

impl CreateInstitutionRequest {
    fn try_into_command(self) -> Result<CreateInstitutionCommand, InstitutionError> {
        let slug = Slug::new(self.slug)?;
        Ok(CreateInstitutionCommand {
            slug,
            name: self.name,
            registration_number: self.registration_number,
            contact_email: self.contact_email,
            website: self.website,
            city: self.city,
            country: self.country,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InstitutionResponse {
    pub institution: Institution,
}
