pub mod canonical;
pub mod errors;
pub mod models;
pub mod ports;
pub mod service;
pub mod signer;

pub use models::CertificateData;
pub use models::CertificateId;
pub use service::CertificateService;
