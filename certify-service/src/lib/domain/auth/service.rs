use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIdentity;
use auth::TokenIssuer;
use chrono::Utc;
use serde_json::json;

use crate::domain::audit::models::AuthEvent;
use crate::domain::audit::models::AuthEventKind;
use crate::domain::audit::ports::AuditLog;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::ClientInfo;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginResult;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::SignupResult;
use crate::domain::auth::models::UpdateProfileCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::UserProfile;
use crate::domain::auth::models::UserRole;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;

use async_trait::async_trait;

/// Domain service for authentication operations.
///
/// Composes the user repository, audit log, password hasher, and token
/// issuer behind [`AuthServicePort`]. Audit writes are fire-and-forget: a
/// failed write is logged locally and never fails the calling operation.
pub struct AuthService<UR, AL>
where
    UR: UserRepository,
    AL: AuditLog,
{
    repository: Arc<UR>,
    audit: Arc<AL>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
}

impl<UR, AL> AuthService<UR, AL>
where
    UR: UserRepository,
    AL: AuditLog,
{
    pub fn new(repository: Arc<UR>, audit: Arc<AL>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            audit,
            token_issuer,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Best-effort audit write. At most one entry per service call.
    async fn record_event(
        &self,
        kind: AuthEventKind,
        user_id: Option<UserId>,
        client: &ClientInfo,
        metadata: serde_json::Value,
    ) {
        let event = AuthEvent::new(kind, user_id, client, metadata);
        if let Err(e) = self.audit.record(event).await {
            tracing::error!(kind = kind.as_str(), "Failed to record auth event: {}", e);
        }
    }

    fn identity_for(user: &User) -> TokenIdentity {
        TokenIdentity {
            user_id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            institution_id: user.institution_id.map(|id| id.to_string()),
        }
    }

    async fn profile_of(&self, user: &User) -> Result<UserProfile, AuthError> {
        let institution = match &user.institution_id {
            Some(id) => self.repository.institution_summary(id).await?,
            None => None,
        };
        Ok(UserProfile::from_user(user, institution))
    }
}

#[async_trait]
impl<UR, AL> AuthServicePort for AuthService<UR, AL>
where
    UR: UserRepository,
    AL: AuditLog,
{
    async fn signup(
        &self,
        command: SignupCommand,
        client: ClientInfo,
    ) -> Result<SignupResult, AuthError> {
        let email = command.email.clone();

        if self.repository.find_by_email(&email).await?.is_some() {
            self.record_event(
                AuthEventKind::Signup,
                None,
                &client,
                json!({ "email": email.as_str(), "error": "Email already exists" }),
            )
            .await;
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AuthError::Password(e.to_string()))?;

        let email_verify_token = self
            .token_issuer
            .issue_email_verification(email.as_str())
            .map_err(|e| AuthError::Token(e.to_string()))?;

        let now = Utc::now();
        let mut user = User {
            id: UserId::new(),
            email,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            role: UserRole::User,
            email_verified: false,
            profile_completed: false,
            email_verify_token: Some(email_verify_token.clone()),
            institution_id: command.institution_id,
            created_at: now,
            updated_at: now,
        };
        user.profile_completed = user.derive_profile_completed();

        let user = self.repository.create(user).await?;

        self.record_event(
            AuthEventKind::Signup,
            Some(user.id),
            &client,
            json!({ "email": user.email.as_str() }),
        )
        .await;

        let tokens = self
            .token_issuer
            .issue_pair(&Self::identity_for(&user))
            .map_err(|e| AuthError::Token(e.to_string()))?;

        let profile = self.profile_of(&user).await?;

        Ok(SignupResult {
            user: profile,
            tokens,
            email_verify_token,
        })
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        client: ClientInfo,
    ) -> Result<LoginResult, AuthError> {
        // A malformed email cannot match a stored account; treat it exactly
        // like an unknown one so nothing leaks through the error shape.
        let Ok(email) = EmailAddress::new(email.to_string()) else {
            self.record_event(
                AuthEventKind::LoginFailure,
                None,
                &client,
                json!({ "email": email, "error": "Malformed email" }),
            )
            .await;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(user) = self.repository.find_by_email(&email).await? else {
            self.record_event(
                AuthEventKind::LoginFailure,
                None,
                &client,
                json!({ "email": email.as_str(), "error": "User not found" }),
            )
            .await;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, &user.password_hash) {
            self.record_event(
                AuthEventKind::LoginFailure,
                Some(user.id),
                &client,
                json!({ "email": email.as_str(), "error": "Invalid password" }),
            )
            .await;
            return Err(AuthError::InvalidCredentials);
        }

        self.record_event(
            AuthEventKind::LoginSuccess,
            Some(user.id),
            &client,
            json!({ "email": email.as_str() }),
        )
        .await;

        let tokens = self
            .token_issuer
            .issue_pair(&Self::identity_for(&user))
            .map_err(|e| AuthError::Token(e.to_string()))?;

        let profile = self.profile_of(&user).await?;

        Ok(LoginResult {
            user: profile,
            tokens,
        })
    }

    async fn logout(&self, user_id: UserId, client: ClientInfo) -> Result<(), AuthError> {
        self.record_event(AuthEventKind::Logout, Some(user_id), &client, json!({}))
            .await;
        Ok(())
    }

    async fn verify_email(
        &self,
        token: &str,
        client: ClientInfo,
    ) -> Result<UserProfile, AuthError> {
        let email = self
            .token_issuer
            .verify_email_token(token)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        let email = EmailAddress::new(email).map_err(|_| AuthError::InvalidOrExpiredToken)?;

        let mut user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.email_verified = true;
        user.email_verify_token = None;
        user.updated_at = Utc::now();

        let user = self.repository.update(user).await?;

        self.record_event(
            AuthEventKind::EmailVerification,
            Some(user.id),
            &client,
            json!({ "email": user.email.as_str() }),
        )
        .await;

        self.profile_of(&user).await
    }

    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, AuthError> {
        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.profile_of(&user).await
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        command: UpdateProfileCommand,
    ) -> Result<UserProfile, AuthError> {
        let mut user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(first_name) = command.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = command.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(institution_id) = command.institution_id {
            user.institution_id = Some(institution_id);
        }

        // Derived projection, re-evaluated from post-update values on every
        // call regardless of which fields changed.
        user.profile_completed = user.derive_profile_completed();
        user.updated_at = Utc::now();

        let user = self.repository.update(user).await?;

        self.profile_of(&user).await
    }
}
