use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::CertificateError;
use super::models::BulkFailure;
use super::models::BulkIssueReport;
use super::models::CertificateData;
use super::models::CertificateId;
use super::models::CertificateRecord;
use super::models::Subject;
use super::models::Verification;
use super::ports::BlockchainClient;
use super::ports::CertificateServicePort;
use super::ports::CertificateStore;
use super::signer;

/// Domain service for certificate issuance and verification.
///
/// The issuer name is stamped onto every certificate as a plain string
/// snapshot, not a live reference to any institution record.
pub struct CertificateService<CS, BC>
where
    CS: CertificateStore,
    BC: BlockchainClient,
{
    store: Arc<CS>,
    ledger: Arc<BC>,
    issuer_name: String,
}

impl<CS, BC> CertificateService<CS, BC>
where
    CS: CertificateStore,
    BC: BlockchainClient,
{
    pub fn new(store: Arc<CS>, ledger: Arc<BC>, issuer_name: String) -> Self {
        Self {
            store,
            ledger,
            issuer_name,
        }
    }

    fn validate(subject: &Subject) -> Result<(), CertificateError> {
        if subject.name.trim().is_empty() {
            return Err(CertificateError::Validation("Subject name required".into()));
        }
        if subject.email.trim().is_empty() {
            return Err(CertificateError::Validation(
                "Subject email required".into(),
            ));
        }
        if subject.cohort.trim().is_empty() {
            return Err(CertificateError::Validation(
                "Subject cohort required".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<CS, BC> CertificateServicePort for CertificateService<CS, BC>
where
    CS: CertificateStore,
    BC: BlockchainClient,
{
    async fn issue(&self, subject: Subject) -> Result<CertificateRecord, CertificateError> {
        Self::validate(&subject)?;

        let mut data = CertificateData {
            certificate_id: CertificateId::generate(),
            student_name: subject.name,
            cohort: subject.cohort,
            email: subject.email,
            issue_date: Utc::now(),
            issuer_name: self.issuer_name.clone(),
            course_title: subject.course_title.filter(|t| !t.is_empty()),
            blockchain_tx: None,
        };

        // Digest covers the canonical fields only; the ledger reference is
        // attached afterwards without invalidating it.
        let signature = signer::sign(&data);

        let tx = self.ledger.issue_certificate(&data).await?;
        data.blockchain_tx = Some(tx);

        self.store
            .put(&data.certificate_id, &signature, &data)
            .await?;

        tracing::info!(
            certificate_id = %data.certificate_id,
            student = %data.student_name,
            "Certificate issued"
        );

        Ok(CertificateRecord { signature, data })
    }

    async fn bulk_issue(&self, subjects: Vec<Subject>) -> BulkIssueReport {
        let mut report = BulkIssueReport {
            attempted: subjects.len(),
            ..Default::default()
        };

        // Strictly sequential, one ledger call at a time; a failed subject
        // is reported and the rest continue.
        for subject in subjects {
            let name = subject.name.clone();
            match self.issue(subject).await {
                Ok(record) => report.issued.push(record),
                Err(e) => {
                    tracing::error!(student = %name, "Bulk issuance failed for subject: {}", e);
                    report.failed.push(BulkFailure {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        }

        report
    }

    async fn verify(&self, id: &CertificateId) -> Result<Verification, CertificateError> {
        let Some((signature, data)) = self.store.get(id).await? else {
            return Ok(Verification::NotFound);
        };

        if signer::verify(&data, &signature) {
            Ok(Verification::Authentic(Box::new(data)))
        } else {
            Ok(Verification::Tampered)
        }
    }
}
