use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ApiError;
use super::ApiSuccess;
use super::Pagination;
use crate::domain::audit::models::AuthEvent;
use crate::domain::audit::models::AuthEventKind;
use crate::domain::audit::models::AuthEventQuery;
use crate::domain::auth::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub async fn list_auth_logs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<ListAuthLogsParams>,
) -> Result<ApiSuccess<AuthLogsResponse>, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let query = params.try_into_query()?;
    let page = query.page;
    let limit = query.limit;

    let (events, total) = state
        .audit_log
        .query(query)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthLogsResponse {
            logs: events.iter().map(LogEntry::from).collect(),
            pagination: Pagination::new(u64::from(page), u64::from(limit), total),
        },
    ))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAuthLogsParams {
    page: Option<u32>,
    limit: Option<u32>,
    event: Option<String>,
    user_id: Option<String>,
}

impl ListAuthLogsParams {
    fn try_into_query(self) -> Result<AuthEventQuery, ApiError> {
        let kind = self
            .event
            .as_deref()
            .map(|e| {
                AuthEventKind::parse(e)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown event kind: {}", e)))
            })
            .transpose()?;

        let user_id = self
            .user_id
            .as_deref()
            .map(UserId::from_string)
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(AuthEventQuery {
            kind,
            user_id,
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    pub event: AuthEventKind,
    pub user_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<&AuthEvent> for LogEntry {
    fn from(event: &AuthEvent) -> Self {
        Self {
            id: event.id,
            event: event.kind,
            user_id: event.user_id.map(|id| id.to_string()),
            ip_address: event.ip_address.clone(),
            user_agent: event.user_agent.clone(),
            metadata: event.metadata.clone(),
            created_at: event.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthLogsResponse {
    pub logs: Vec<LogEntry>,
    pub pagination: Pagination,
}
