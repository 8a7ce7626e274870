use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::errors::InstitutionIdError;
use super::errors::SlugError;

/// Institution unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InstitutionId(pub Uuid);

impl InstitutionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an institution ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, InstitutionIdError> {
        Uuid::parse_str(s)
            .map(InstitutionId)
            .map_err(|e| InstitutionIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for InstitutionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstitutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Slug value type: the institution's unique external identifier.
///
/// 2-50 characters, lowercase alphanumeric and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slug(String);

impl Slug {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 50;

    /// Create a validated slug.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length out of bounds
    /// * `InvalidCharacters` - Anything other than lowercase alphanumeric or hyphen
    pub fn new(slug: String) -> Result<Self, SlugError> {
        let length = slug.len();
        if length < Self::MIN_LENGTH {
            return Err(SlugError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SlugError::InvalidCharacters);
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Verification state of an institution record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionStatus {
    Pending,
    Verified,
}

impl InstitutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionStatus::Pending => "pending",
            InstitutionStatus::Verified => "verified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InstitutionStatus::Pending),
            "verified" => Some(InstitutionStatus::Verified),
            _ => None,
        }
    }
}

/// Institution aggregate entity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    pub id: InstitutionId,
    pub slug: Slug,
    pub name: String,
    pub registration_number: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: InstitutionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Command to create a new institution.
#[derive(Debug)]
pub struct CreateInstitutionCommand {
    pub slug: Slug,
    pub name: String,
    pub registration_number: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Command to update an institution. All fields optional (partial update).
#[derive(Debug, Default)]
pub struct UpdateInstitutionCommand {
    pub slug: Option<Slug>,
    pub name: Option<String>,
    pub registration_number: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: Option<InstitutionStatus>,
}

/// One page of institutions plus the total match count.
#[derive(Debug)]
pub struct InstitutionPage {
    pub institutions: Vec<Institution>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(Slug::new("dada-devs".to_string()).is_ok());
        assert!(Slug::new("x1".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(matches!(
            Slug::new("x".to_string()),
            Err(SlugError::TooShort { .. })
        ));
        assert!(matches!(
            Slug::new("a".repeat(51)),
            Err(SlugError::TooLong { .. })
        ));
        assert!(matches!(
            Slug::new("Dada Devs".to_string()),
            Err(SlugError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_status_round_trips() {
        for status in [InstitutionStatus::Pending, InstitutionStatus::Verified] {
            assert_eq!(InstitutionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InstitutionStatus::parse("unknown"), None);
    }
}
