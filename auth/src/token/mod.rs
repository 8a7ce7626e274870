pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::AccessClaims;
pub use claims::EmailVerifyClaims;
pub use claims::TokenIdentity;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use issuer::TokenTtls;
