use async_trait::async_trait;
use thiserror::Error;

use super::models::AuthEvent;
use super::models::AuthEventQuery;

/// Error for audit log persistence operations.
///
/// Callers on the write path swallow this error; it only surfaces through
/// the administrative query endpoint.
#[derive(Debug, Clone, Error)]
pub enum AuditLogError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Append-only audit trail of authentication events.
#[async_trait]
pub trait AuditLog: Send + Sync + 'static {
    /// Persist one audit entry.
    ///
    /// Best-effort contract: the caller logs and discards a failure so a
    /// broken audit store can never fail a successful auth operation.
    ///
    /// # Errors
    /// * `DatabaseError` - Audit store write failed
    async fn record(&self, event: AuthEvent) -> Result<(), AuditLogError>;

    /// Query entries for administrative review, newest first.
    ///
    /// # Returns
    /// The matching page of entries and the total match count
    ///
    /// # Errors
    /// * `DatabaseError` - Audit store read failed
    async fn query(&self, query: AuthEventQuery) -> Result<(Vec<AuthEvent>, u64), AuditLogError>;
}
