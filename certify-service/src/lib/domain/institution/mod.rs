pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use models::Institution;
pub use models::InstitutionId;
pub use service::InstitutionService;
