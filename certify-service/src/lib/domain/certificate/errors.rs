use thiserror::Error;

/// Top-level error for certificate issuance operations.
///
/// Verification outcomes are not errors; see
/// [`Verification`](super::models::Verification).
#[derive(Debug, Clone, Error)]
pub enum CertificateError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Certificate store error: {0}")]
    Store(String),
}
