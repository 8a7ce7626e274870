use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::audit::ports::AuditLogError;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::ClientInfo;
use crate::domain::certificate::errors::CertificateError;
use crate::domain::institution::errors::InstitutionError;

pub mod bulk_issue_certificates;
pub mod create_institution;
pub mod delete_institution;
pub mod get_institution;
pub mod get_profile;
pub mod issue_certificate;
pub mod list_auth_logs;
pub mod list_institutions;
pub mod login;
pub mod logout;
pub mod signup;
pub mod update_institution;
pub mod update_profile;
pub mod verify_certificate;
pub mod verify_email;

/// A successful response: status code plus a JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Boundary error type mapping domain failures to HTTP statuses.
///
/// Every failure body is uniformly `{"error": string}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadGateway(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateEmail
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidUserId(_)
            | AuthError::InvalidOrExpiredToken
            | AuthError::Validation(_) => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::UserNotFound => ApiError::NotFound(err.to_string()),
            AuthError::Password(_) | AuthError::Token(_) | AuthError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<InstitutionError> for ApiError {
    fn from(err: InstitutionError) -> Self {
        match err {
            InstitutionError::DuplicateSlug
            | InstitutionError::InvalidId(_)
            | InstitutionError::InvalidSlug(_)
            | InstitutionError::Validation(_) => ApiError::BadRequest(err.to_string()),
            InstitutionError::NotFound => ApiError::NotFound(err.to_string()),
            InstitutionError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CertificateError> for ApiError {
    fn from(err: CertificateError) -> Self {
        match err {
            CertificateError::Validation(_) => ApiError::BadRequest(err.to_string()),
            CertificateError::Ledger(_) => ApiError::BadGateway(err.to_string()),
            CertificateError::Store(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuditLogError> for ApiError {
    fn from(err: AuditLogError) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}

/// Offset-pagination metadata attached to every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let pages = total.div_ceil(limit.max(1));
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

/// Plain `{message}` body for operations with nothing else to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Extract client network details once at the HTTP edge.
///
/// The service layer only ever sees this plain value, never a framework
/// request type.
pub fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        });

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    ClientInfo {
        ip_address,
        user_agent,
    }
}
