use async_trait::async_trait;

use super::errors::CertificateError;
use super::models::BulkIssueReport;
use super::models::CertificateData;
use super::models::CertificateId;
use super::models::CertificateRecord;
use super::models::Subject;
use super::models::Verification;

/// Port for certificate domain operations.
#[async_trait]
pub trait CertificateServicePort: Send + Sync + 'static {
    /// Issue one certificate: generate the id, sign the canonical form,
    /// record it on the ledger, and persist digest + snapshot.
    ///
    /// # Errors
    /// * `Validation` - Subject fields missing
    /// * `Ledger` - Ledger submission failed
    /// * `Store` - Certificate store write failed
    async fn issue(&self, subject: Subject) -> Result<CertificateRecord, CertificateError>;

    /// Issue certificates for a list of subjects, strictly sequentially.
    ///
    /// Continue-on-error: one subject's failure is reported and does not
    /// abort the rest. Always returns a report, never an error.
    async fn bulk_issue(&self, subjects: Vec<Subject>) -> BulkIssueReport;

    /// Resolve a certificate id to one of three terminal states:
    /// authentic, tampered, or not found.
    ///
    /// # Errors
    /// * `Store` - Certificate store read failed
    async fn verify(&self, id: &CertificateId) -> Result<Verification, CertificateError>;
}

/// Append-only keyed store of issued certificates.
///
/// No update or delete: a certificate is never mutated after issuance, and
/// revocation is tracked on the ledger, not here.
#[async_trait]
pub trait CertificateStore: Send + Sync + 'static {
    /// Persist digest + data snapshot under the certificate id.
    ///
    /// # Errors
    /// * `Store` - Write failed
    async fn put(
        &self,
        id: &CertificateId,
        signature: &str,
        data: &CertificateData,
    ) -> Result<(), CertificateError>;

    /// Fetch digest + snapshot for an id, or `None` when never issued.
    ///
    /// # Errors
    /// * `Store` - Read failed
    async fn get(
        &self,
        id: &CertificateId,
    ) -> Result<Option<(String, CertificateData)>, CertificateError>;
}

/// External ledger collaborator.
///
/// Calls are long-running and blocking until resolved; the transaction
/// reference is opaque to this service.
#[async_trait]
pub trait BlockchainClient: Send + Sync + 'static {
    /// Record an issuance on the ledger and return its transaction
    /// reference.
    ///
    /// # Errors
    /// * `Ledger` - Submission failed or was rejected
    async fn issue_certificate(&self, data: &CertificateData) -> Result<String, CertificateError>;
}
