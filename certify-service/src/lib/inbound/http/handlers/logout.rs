use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Extension;

use super::client_info;
use super::ApiError;
use super::ApiSuccess;
use super::MessageResponse;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Audit-only: token invalidation is the client's responsibility.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    headers: HeaderMap,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    let client = client_info(&headers);

    state
        .auth_service
        .logout(user.user_id, client)
        .await
        .map_err(ApiError::from)
        .map(|()| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageResponse {
                    message: "Logged out successfully".to_string(),
                },
            )
        })
}
