use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::certificate::models::CertificateData;
use crate::domain::certificate::models::CertificateRecord;
use crate::domain::certificate::models::Subject;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn issue_certificate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<IssueCertificateRequest>,
) -> Result<ApiSuccess<CertificateResponse>, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    state
        .certificate_service
        .issue(body.into_subject())
        .await
        .map_err(ApiError::from)
        .map(|record| ApiSuccess::new(StatusCode::CREATED, record.into()))
}

/// HTTP request body for issuing one certificate (raw JSON)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCertificateRequest {
    student_name: String,
    email: String,
    cohort: String,
    course_title: Option<String>,
}

impl IssueCertificateRequest {
    fn into_subject(self) -> Subject {
        Subject {
            name: self.student_name,
            email: self.email,
            cohort: self.cohort,
            course_title: self.course_title,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CertificateResponse {
    pub certificate: CertificateBody,
}

/// Issued certificate as presented over HTTP: the data snapshot plus its
/// integrity digest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateBody {
    #[serde(flatten)]
    pub data: CertificateData,
    pub signature: String,
}

impl From<CertificateRecord> for CertificateResponse {
    fn from(record: CertificateRecord) -> Self {
        Self {
            certificate: CertificateBody {
                data: record.data,
                signature: record.signature,
            },
        }
    }
}
