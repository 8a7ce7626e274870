use sha2::Digest;
use sha2::Sha256;

use super::canonical::canonicalize;
use super::models::CertificateData;

/// Compute the certificate's integrity digest: SHA-256 over the canonical
/// form, as lowercase hex.
///
/// This is a fixity check, not an authenticated signature: anyone who can
/// read the canonical fields can recompute a matching digest. The only
/// anti-forgery guarantee comes from the external ledger write.
pub fn sign(data: &CertificateData) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonicalize(data).as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute the digest and compare for exact equality.
///
/// Constant-time comparison is not required: the digest is an integrity
/// fingerprint, not a secret.
pub fn verify(data: &CertificateData, signature: &str) -> bool {
    sign(data) == signature
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::domain::certificate::models::CertificateId;

    fn sample() -> CertificateData {
        CertificateData {
            certificate_id: CertificateId::from_string(
                "dd-cert-00000000-0000-4000-8000-000000000000",
            ),
            student_name: "Ada Lovelace".to_string(),
            cohort: "Cohort 4".to_string(),
            email: "ada@example.com".to_string(),
            issue_date: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
            issuer_name: "Dada Devs".to_string(),
            course_title: None,
            blockchain_tx: None,
        }
    }

    #[test]
    fn test_known_answer_vector() {
        // SHA-256 of the fixed canonical form of `sample()`
        assert_eq!(
            sign(&sample()),
            "fc0711d9124e2a21837898586f0bece48f53a7f7f26c816cf26431a599fe41af"
        );
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let digest = sign(&sample());
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_then_verify() {
        let data = sample();
        let digest = sign(&data);
        assert!(verify(&data, &digest));
    }

    #[test]
    fn test_any_field_mutation_breaks_verification() {
        let original = sample();
        let digest = sign(&original);

        let mutations: Vec<CertificateData> = vec![
            {
                let mut d = original.clone();
                d.certificate_id = CertificateId::from_string(
                    "dd-cert-00000000-0000-4000-8000-000000000001",
                );
                d
            },
            {
                let mut d = original.clone();
                d.student_name = "Ada Lovelacf".to_string();
                d
            },
            {
                let mut d = original.clone();
                d.cohort = "Cohort 5".to_string();
                d
            },
            {
                let mut d = original.clone();
                d.email = "adb@example.com".to_string();
                d
            },
            {
                let mut d = original.clone();
                d.issue_date = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 1).unwrap();
                d
            },
            {
                let mut d = original.clone();
                d.issuer_name = "Dada Devt".to_string();
                d
            },
            {
                let mut d = original.clone();
                d.course_title = Some("x".to_string());
                d
            },
        ];

        for mutated in mutations {
            assert!(
                !verify(&mutated, &digest),
                "mutation went undetected: {:?}",
                mutated
            );
        }
    }

    #[test]
    fn test_wrong_digest_rejected() {
        let data = sample();
        assert!(!verify(&data, "deadbeef"));
        assert!(!verify(&data, ""));
    }
}
