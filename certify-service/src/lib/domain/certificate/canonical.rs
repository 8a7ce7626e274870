use serde::Serialize;

use super::models::CertificateData;

/// Canonical wire form of a certificate: compact JSON with this exact field
/// order. Field order is fixed by struct declaration order, so the output is
/// byte-identical for equal data on every platform and run.
///
/// `blockchain_tx` is deliberately absent: the ledger reference is recorded
/// after signing and must not affect the digest.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalForm<'a> {
    certificate_id: &'a str,
    student_name: &'a str,
    cohort: &'a str,
    email: &'a str,
    issue_date: String,
    issuer_name: &'a str,
    course_title: &'a str,
}

/// Produce the deterministic serialization used as hashing input.
///
/// An absent course title and an empty one are indistinguishable by design:
/// both canonicalize to `""`.
pub fn canonicalize(data: &CertificateData) -> String {
    let form = CanonicalForm {
        certificate_id: data.certificate_id.as_str(),
        student_name: &data.student_name,
        cohort: &data.cohort,
        email: &data.email,
        issue_date: data.issue_date_iso(),
        issuer_name: &data.issuer_name,
        course_title: data.course_title.as_deref().unwrap_or(""),
    };

    // Serialization of a struct of strings cannot fail
    serde_json::to_string(&form).expect("canonical form serialization")
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
    fn test_exact_canonical_form() {
        let expected = concat!(
            r#"{"certificateId":"dd-cert-00000000-0000-4000-8000-000000000000","#,
            r#""studentName":"Ada Lovelace","cohort":"Cohort 4","#,
            r#""email":"ada@example.com","issueDate":"2026-01-15T09:30:00.000Z","#,
            r#""issuerName":"Dada Devs","courseTitle":""}"#
        );
        assert_eq!(canonicalize(&sample()), expected);
    }

    #[test]
    fn test_deterministic_for_equal_by_value_data() {
        let first = sample();
        let second = sample();
        assert_eq!(canonicalize(&first), canonicalize(&second));
    }

    #[test]
    fn test_absent_and_empty_course_title_collapse() {
        let absent = sample();
        let mut empty = sample();
        empty.course_title = Some(String::new());

        assert_eq!(canonicalize(&absent), canonicalize(&empty));
    }

    #[test]
    fn test_ledger_reference_not_part_of_canonical_form() {
        let plain = sample();
        let mut with_tx = sample();
        with_tx.blockchain_tx = Some("0xabc123".to_string());

        assert_eq!(canonicalize(&plain), canonicalize(&with_tx));
    }
}
