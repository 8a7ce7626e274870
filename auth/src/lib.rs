//! Authentication infrastructure library
//!
//! Provides reusable authentication building blocks for the certify services:
//! - Password hashing (Argon2id)
//! - Signed, expiring token issuance and verification (access / refresh /
//!   email-verification classes)
//!
//! The service crate defines its own domain ports and adapts these
//! implementations, so domain logic never depends on a specific hashing or
//! token library.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenTtls, TokenIdentity};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", TokenTtls::default());
//! let identity = TokenIdentity {
//!     user_id: "user123".to_string(),
//!     email: "user@example.com".to_string(),
//!     role: "USER".to_string(),
//!     institution_id: None,
//! };
//! let pair = issuer.issue_pair(&identity).unwrap();
//! let claims = issuer.verify_access(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::EmailVerifyClaims;
pub use token::TokenError;
pub use token::TokenIdentity;
pub use token::TokenIssuer;
pub use token::TokenPair;
pub use token::TokenTtls;
