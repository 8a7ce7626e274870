use std::fmt;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Program tag prefixed onto every certificate identifier.
pub const CERTIFICATE_ID_PREFIX: &str = "dd-cert-";

/// Certificate identifier: fixed program prefix plus a random 128-bit value
/// in UUIDv4 layout.
///
/// Uniqueness is probabilistic; no store-side check is performed at
/// generation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId(String);

impl CertificateId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(format!("{}{}", CERTIFICATE_ID_PREFIX, Uuid::new_v4()))
    }

    /// Wrap an identifier received from a caller (e.g. a verify lookup).
    ///
    /// Lookup keys are opaque; an id that was never issued simply resolves
    /// to not-found, so no shape validation happens here.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The immutable fields of one issued certificate.
///
/// Created at issuance time and never mutated; revocation is a ledger-level
/// fact, not a change to this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    pub certificate_id: CertificateId,
    pub student_name: String,
    pub cohort: String,
    pub email: String,
    pub issue_date: DateTime<Utc>,
    pub issuer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_tx: Option<String>,
}

impl CertificateData {
    /// Issue date in the fixed wire form used by the canonicalizer:
    /// ISO-8601 UTC with millisecond precision and a `Z` suffix.
    pub fn issue_date_iso(&self) -> String {
        self.issue_date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Stored artifact: digest plus data snapshot, keyed by certificate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateRecord {
    pub signature: String,
    pub data: CertificateData,
}

/// One subject in a (bulk) issuance request.
#[derive(Debug, Clone, Deserialize)]
pub struct Subject {
    pub name: String,
    pub email: String,
    pub cohort: String,
    pub course_title: Option<String>,
}

/// A subject whose issuance failed mid-bulk.
#[derive(Debug, Clone, Serialize)]
pub struct BulkFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of a bulk issuance run: which subjects succeeded, which failed,
/// and how many were attempted. A failure never aborts the remainder.
#[derive(Debug, Default)]
pub struct BulkIssueReport {
    pub issued: Vec<CertificateRecord>,
    pub failed: Vec<BulkFailure>,
    pub attempted: usize,
}

/// Terminal verification states. A digest mismatch is a state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Stored digest matches the recomputed one.
    Authentic(Box<CertificateData>),
    /// The stored snapshot no longer matches its digest.
    Tampered,
    /// No record under this identifier.
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_id_shape() {
        let id = CertificateId::generate();
        let s = id.as_str();

        assert!(s.starts_with(CERTIFICATE_ID_PREFIX));

        let uuid_part = &s[CERTIFICATE_ID_PREFIX.len()..];
        let parsed = Uuid::parse_str(uuid_part).expect("Suffix is not a UUID");
        assert_eq!(parsed.get_version_num(), 4);
        // RFC 4122 variant (10xx in the high bits of byte 8)
        assert_eq!(parsed.as_bytes()[8] & 0xc0, 0x80);
    }

    #[test]
    fn test_successive_ids_differ() {
        assert_ne!(CertificateId::generate(), CertificateId::generate());
    }

    #[test]
    fn test_issue_date_iso_is_utc_millis() {
        let data = CertificateData {
            certificate_id: CertificateId::generate(),
            student_name: "Ada Lovelace".to_string(),
            cohort: "Cohort 4".to_string(),
            email: "ada@example.com".to_string(),
            issue_date: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
            issuer_name: "Dada Devs".to_string(),
            course_title: None,
            blockchain_tx: None,
        };

        assert_eq!(data.issue_date_iso(), "2026-01-15T09:30:00.000Z");
    }
}
