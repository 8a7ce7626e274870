pub mod models;
pub mod ports;

pub use models::AuthEvent;
pub use models::AuthEventKind;
pub use models::AuthEventQuery;
pub use ports::AuditLog;
pub use ports::AuditLogError;
