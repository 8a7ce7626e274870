use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::claims::AccessClaims;
use super::claims::EmailVerifyClaims;
use super::claims::TokenIdentity;
use super::errors::TokenError;

/// Time-to-live for each token class.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtls {
    pub access_days: i64,
    pub refresh_days: i64,
    pub email_verify_hours: i64,
}

impl Default for TokenTtls {
    fn default() -> Self {
        Self {
            access_days: 7,
            refresh_days: 30,
            email_verify_hours: 24,
        }
    }
}

/// An access/refresh token pair minted for one identity.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signed token issuance and verification.
///
/// Uses HS256 with a single process-wide secret. Rotating the secret
/// invalidates all outstanding tokens; no revocation list is maintained.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttls: TokenTtls,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Signing key, at least 256 bits for HS256. Store in
    ///   environment/secret storage, never in code.
    /// * `ttls` - Per-class token lifetimes
    pub fn new(secret: &[u8], ttls: TokenTtls) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttls,
        }
    }

    /// Mint an access + refresh token pair for an identity.
    ///
    /// Both tokens carry the same claims shape; only the expiry differs.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_pair(&self, identity: &TokenIdentity) -> Result<TokenPair, TokenError> {
        let now = Utc::now();

        let access_claims = AccessClaims::new(
            identity,
            now.timestamp(),
            (now + Duration::days(self.ttls.access_days)).timestamp(),
        );
        let refresh_claims = AccessClaims::new(
            identity,
            now.timestamp(),
            (now + Duration::days(self.ttls.refresh_days)).timestamp(),
        );

        Ok(TokenPair {
            access_token: self.encode(&access_claims)?,
            refresh_token: self.encode(&refresh_claims)?,
        })
    }

    /// Mint an email-verification token binding only the email address.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_email_verification(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = EmailVerifyClaims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.ttls.email_verify_hours)).timestamp(),
        };

        self.encode(&claims)
    }

    /// Verify an access (or refresh) token and return its claims.
    ///
    /// # Errors
    /// * `InvalidOrExpired` - Signature invalid, token malformed, or expired;
    ///   the causes are deliberately not distinguished
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode(token)
    }

    /// Verify an email-verification token and return the bound email.
    ///
    /// # Errors
    /// * `InvalidOrExpired` - Signature invalid, token malformed, or expired
    pub fn verify_email_token(&self, token: &str) -> Result<String, TokenError> {
        let claims: EmailVerifyClaims = self.decode(token)?;
        Ok(claims.email)
    }

    fn encode<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, TokenError> {
        let validation = Validation::new(self.algorithm);

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidOrExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn identity() -> TokenIdentity {
        TokenIdentity {
            user_id: "user123".to_string(),
            email: "user@example.com".to_string(),
            role: "USER".to_string(),
            institution_id: None,
        }
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let issuer = TokenIssuer::new(SECRET, TokenTtls::default());

        let pair = issuer.issue_pair(&identity()).expect("Failed to issue pair");
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());

        let claims = issuer
            .verify_access(&pair.access_token)
            .expect("Failed to verify access token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.role, "USER");

        // Refresh token verifies under the same key with a longer expiry
        let refresh_claims = issuer
            .verify_access(&pair.refresh_token)
            .expect("Failed to verify refresh token");
        assert!(refresh_claims.exp > claims.exp);
    }

    #[test]
    fn test_ttls_applied_per_class() {
        let ttls = TokenTtls {
            access_days: 7,
            refresh_days: 30,
            email_verify_hours: 24,
        };
        let issuer = TokenIssuer::new(SECRET, ttls);

        let pair = issuer.issue_pair(&identity()).unwrap();
        let access = issuer.verify_access(&pair.access_token).unwrap();
        let refresh = issuer.verify_access(&pair.refresh_token).unwrap();

        assert_eq!(access.exp - access.iat, 7 * 24 * 60 * 60);
        assert_eq!(refresh.exp - refresh.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_email_verification_round_trip() {
        let issuer = TokenIssuer::new(SECRET, TokenTtls::default());

        let token = issuer
            .issue_email_verification("user@example.com")
            .expect("Failed to issue email token");
        let email = issuer
            .verify_email_token(&token)
            .expect("Failed to verify email token");

        assert_eq!(email, "user@example.com");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenIssuer::new(SECRET, TokenTtls::default());
        let other = TokenIssuer::new(b"another_secret_key_32_bytes_long!!", TokenTtls::default());

        let pair = issuer.issue_pair(&identity()).unwrap();
        let result = other.verify_access(&pair.access_token);

        assert!(matches!(result, Err(TokenError::InvalidOrExpired)));
    }

    #[test]
    fn test_expired_token_rejected_identically() {
        let ttls = TokenTtls {
            access_days: -1,
            refresh_days: 30,
            email_verify_hours: 24,
        };
        let issuer = TokenIssuer::new(SECRET, ttls);

        let pair = issuer.issue_pair(&identity()).unwrap();
        let result = issuer.verify_access(&pair.access_token);

        // Same error as a tampered token
        assert!(matches!(result, Err(TokenError::InvalidOrExpired)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let issuer = TokenIssuer::new(SECRET, TokenTtls::default());
        let result = issuer.verify_access("invalid.token.here");
        assert!(matches!(result, Err(TokenError::InvalidOrExpired)));
    }
}
