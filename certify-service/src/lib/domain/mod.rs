pub mod audit;
pub mod auth;
pub mod certificate;
pub mod institution;
