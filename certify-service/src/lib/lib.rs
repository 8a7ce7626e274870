pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::audit;
pub use domain::certificate;
pub use domain::institution;
pub use outbound::repositories;
