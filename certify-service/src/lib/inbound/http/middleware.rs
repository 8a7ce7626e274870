use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::auth::models::UserId;
use crate::domain::auth::models::UserRole;
use crate::domain::institution::models::InstitutionId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified bearer identity through a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
    pub institution_id: Option<InstitutionId>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Middleware that validates bearer tokens and stores the caller's
/// identity in request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_issuer.verify_access(token).map_err(|e| {
        tracing::warn!("Access token validation failed: {}", e);
        unauthorized("Invalid or expired token")
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        unauthorized("Invalid token format")
    })?;

    let role = UserRole::parse(&claims.role).ok_or_else(|| {
        tracing::error!(role = %claims.role, "Unknown role claim in token");
        unauthorized("Invalid token format")
    })?;

    let institution_id = claims
        .institution_id
        .as_deref()
        .map(InstitutionId::from_string)
        .transpose()
        .map_err(|e| {
            tracing::error!("Failed to parse institution ID from token: {}", e);
            unauthorized("Invalid token format")
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        role,
        institution_id,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
