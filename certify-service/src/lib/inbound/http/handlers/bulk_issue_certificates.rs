use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::issue_certificate::CertificateBody;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::certificate::models::BulkFailure;
use crate::domain::certificate::models::BulkIssueReport;
use crate::domain::certificate::models::Subject;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Sequential bulk issuance. One subject's failure never aborts the rest,
/// so this endpoint always answers 200 with a per-subject report.
pub async fn bulk_issue_certificates(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<BulkIssueRequest>,
) -> Result<ApiSuccess<BulkIssueResponse>, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let subjects = body
        .subjects
        .into_iter()
        .map(SubjectRequest::into_subject)
        .collect();

    let report = state.certificate_service.bulk_issue(subjects).await;

    Ok(ApiSuccess::new(StatusCode::OK, report.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkIssueRequest {
    subjects: Vec<SubjectRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequest {
    student_name: String,
    email: String,
    cohort: String,
    course_title: Option<String>,
}

impl SubjectRequest {
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
pub struct BulkIssueResponse {
    pub issued: Vec<CertificateBody>,
    pub failed: Vec<BulkFailure>,
    pub attempted: usize,
}

impl From<BulkIssueReport> for BulkIssueResponse {
    fn from(report: BulkIssueReport) -> Self {
        Self {
            issued: report
                .issued
                .into_iter()
                .map(|record| CertificateBody {
                    data: record.data,
                    signature: record.signature,
                })
                .collect(),
            failed: report.failed,
            attempted: report.attempted,
        }
    }
}
