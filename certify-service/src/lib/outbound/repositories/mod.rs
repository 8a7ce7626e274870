pub mod audit;
pub mod certificate;
pub mod institution;
pub mod user;

pub use audit::PostgresAuditLog;
pub use certificate::PostgresCertificateStore;
pub use institution::PostgresInstitutionRepository;
pub use user::PostgresUserRepository;
