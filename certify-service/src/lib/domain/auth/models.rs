use std::fmt;
use std::str::FromStr;

use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::UserIdError;
use crate::domain::institution::models::InstitutionId;

/// User aggregate entity.
///
/// Carries the credential hash; it never leaves the domain layer. Outward
/// representations go through [`UserProfile`], which has no hash field.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub email_verified: bool,
    pub profile_completed: bool,
    pub email_verify_token: Option<String>,
    pub institution_id: Option<InstitutionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Derive profile completeness from the current name fields.
    ///
    /// True iff both first and last name are present and non-empty. This is
    /// a re-evaluated projection, not a sticky flag.
    pub fn derive_profile_completed(&self) -> bool {
        fn present(field: &Option<String>) -> bool {
            field.as_deref().is_some_and(|s| !s.is_empty())
        }
        present(&self.first_name) && present(&self.last_name)
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role carried by a user record and bound into issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Client network details captured once at the HTTP edge.
///
/// Passed into the service layer as a plain value so the domain never
/// depends on a framework request type.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Short institution view attached to profile responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionSummary {
    pub id: InstitutionId,
    pub slug: String,
    pub name: String,
}

/// Outward user representation. Deliberately has no credential hash field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub email_verified: bool,
    pub profile_completed: bool,
    pub institution_id: Option<InstitutionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<InstitutionSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn from_user(user: &User, institution: Option<InstitutionSummary>) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            email_verified: user.email_verified,
            profile_completed: user.profile_completed,
            institution_id: user.institution_id,
            institution,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Command to register a new user.
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub institution_id: Option<InstitutionId>,
}

/// Command to update profile fields. All fields optional (partial update).
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub institution_id: Option<InstitutionId>,
}

/// Everything a successful signup hands back to the transport layer.
///
/// The raw verification token is returned to the caller, who owns delivery
/// (e-mail sending is out of scope for this service).
#[derive(Debug)]
pub struct SignupResult {
    pub user: UserProfile,
    pub tokens: TokenPair,
    pub email_verify_token: String,
}

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginResult {
    pub user: UserProfile,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_names(first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test".to_string(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            role: UserRole::User,
            email_verified: false,
            profile_completed: false,
            email_verify_token: None,
            institution_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_completed_requires_both_names() {
        assert!(!user_with_names(None, None).derive_profile_completed());
        assert!(!user_with_names(Some("Ada"), None).derive_profile_completed());
        assert!(!user_with_names(None, Some("Lovelace")).derive_profile_completed());
        assert!(user_with_names(Some("Ada"), Some("Lovelace")).derive_profile_completed());
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        assert!(!user_with_names(Some(""), Some("Lovelace")).derive_profile_completed());
    }

    #[test]
    fn test_profile_serialization_has_no_hash_field() {
        let user = user_with_names(Some("Ada"), Some("Lovelace"));
        let profile = UserProfile::from_user(&user, None);

        let json = serde_json::to_value(&profile).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();

        assert!(!keys.iter().any(|k| k.to_lowercase().contains("password")));
        assert!(!keys.iter().any(|k| k.to_lowercase().contains("hash")));
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }
}
