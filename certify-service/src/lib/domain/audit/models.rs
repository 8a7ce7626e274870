use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::auth::models::ClientInfo;
use crate::domain::auth::models::UserId;

/// Kind of authentication event recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    Signup,
    LoginSuccess,
    LoginFailure,
    Logout,
    PasswordReset,
    EmailVerification,
}

impl AuthEventKind {
    /// Stable string form used for storage and query filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthEventKind::Signup => "signup",
            AuthEventKind::LoginSuccess => "login_success",
            AuthEventKind::LoginFailure => "login_failure",
            AuthEventKind::Logout => "logout",
            AuthEventKind::PasswordReset => "password_reset",
            AuthEventKind::EmailVerification => "email_verification",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "signup" => Some(AuthEventKind::Signup),
            "login_success" => Some(AuthEventKind::LoginSuccess),
            "login_failure" => Some(AuthEventKind::LoginFailure),
            "logout" => Some(AuthEventKind::Logout),
            "password_reset" => Some(AuthEventKind::PasswordReset),
            "email_verification" => Some(AuthEventKind::EmailVerification),
            _ => None,
        }
    }
}

/// One immutable entry in the append-only audit trail.
///
/// `user_id` is optional: a failed login may have no resolvable user.
#[derive(Debug, Clone, Serialize)]
pub struct AuthEvent {
    pub id: Uuid,
    pub kind: AuthEventKind,
    pub user_id: Option<UserId>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuthEvent {
    /// Build a new audit entry stamped with the current time.
    pub fn new(
        kind: AuthEventKind,
        user_id: Option<UserId>,
        client: &ClientInfo,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            user_id,
            ip_address: client.ip_address.clone(),
            user_agent: client.user_agent.clone(),
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// Filters and pagination for administrative audit review.
#[derive(Debug, Clone, Default)]
pub struct AuthEventQuery {
    pub kind: Option<AuthEventKind>,
    pub user_id: Option<UserId>,
    pub page: u32,
    pub limit: u32,
}
