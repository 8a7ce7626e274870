use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::client_info;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::SignupResult;
use crate::domain::auth::models::UserProfile;
use crate::domain::institution::models::InstitutionId;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<SignupResponse>, ApiError> {
    let client = client_info(&headers);
    let command = body.try_into_command()?;

    state
        .auth_service
        .signup(command, client)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::CREATED, result.into()))
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
    institution_id: Option<String>,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, AuthError> {
        let email = EmailAddress::new(self.email)?;
        let institution_id = self
            .institution_id
            .as_deref()
            .map(InstitutionId::from_string)
            .transpose()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        Ok(SignupCommand {
            email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            institution_id,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
    pub email_verify_token: String,
}

impl From<SignupResult> for SignupResponse {
    fn from(result: SignupResult) -> Self {
        Self {
            user: result.user,
            access_token: result.tokens.access_token,
            refresh_token: result.tokens.refresh_token,
            email_verify_token: result.email_verify_token,
        }
    }
}
