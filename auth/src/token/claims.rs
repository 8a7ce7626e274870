use serde::Deserialize;
use serde::Serialize;

/// The identity a token binds: who the subject is and what they may act as.
///
/// Access and refresh tokens carry the same identity shape and differ only
/// in expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub institution_id: Option<String>,
}

/// Claims carried by access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    pub email: String,

    pub role: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(identity: &TokenIdentity, iat: i64, exp: i64) -> Self {
        Self {
            sub: identity.user_id.clone(),
            email: identity.email.clone(),
            role: identity.role.clone(),
            institution_id: identity.institution_id.clone(),
            iat,
            exp,
        }
    }
}

/// Claims carried by email-verification tokens.
///
/// These tokens bind only the email address to verify, not a full identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailVerifyClaims {
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
