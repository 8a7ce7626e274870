use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::certificate::models::CertificateData;
use crate::domain::certificate::models::CertificateId;
use crate::domain::certificate::models::Verification;
use crate::inbound::http::router::AppState;

/// Public fixity check: resolves to exactly one of three terminal states.
pub async fn verify_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<VerifyCertificateResponse>, ApiError> {
    let certificate_id = CertificateId::from_string(id);

    state
        .certificate_service
        .verify(&certificate_id)
        .await
        .map_err(ApiError::from)
        .map(|verification| ApiSuccess::new(StatusCode::OK, verification.into()))
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyCertificateResponse {
    pub valid: bool,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateData>,
}

impl From<Verification> for VerifyCertificateResponse {
    fn from(verification: Verification) -> Self {
        match verification {
            Verification::Authentic(data) => Self {
                valid: true,
                status: "authentic",
                certificate: Some(*data),
            },
            Verification::Tampered => Self {
                valid: false,
                status: "tampered",
                certificate: None,
            },
            Verification::NotFound => Self {
                valid: false,
                status: "not_found",
                certificate: None,
            },
        }
    }
}
