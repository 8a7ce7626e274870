use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::certificate::errors::CertificateError;
use crate::domain::certificate::models::CertificateData;
use crate::domain::certificate::ports::BlockchainClient;

/// Ledger client for deployments without a chain endpoint.
///
/// Logs every issuance and answers with a synthetic transaction reference
/// so the rest of the pipeline behaves exactly as with a real ledger.
pub struct NoopLedgerClient;

impl NoopLedgerClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopLedgerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockchainClient for NoopLedgerClient {
    async fn issue_certificate(&self, data: &CertificateData) -> Result<String, CertificateError> {
        let tx = format!("noop-tx-{}", Uuid::new_v4());
        tracing::info!(
            certificate_id = data.certificate_id.as_str(),
            tx = %tx,
            "Ledger issuance recorded (noop)"
        );
        Ok(tx)
    }
}
