use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::ClientInfo;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::InstitutionSummary;
use crate::domain::auth::models::LoginResult;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::SignupResult;
use crate::domain::auth::models::UpdateProfileCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::UserProfile;
use crate::domain::institution::models::InstitutionId;

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and mint their first token pair.
    ///
    /// On success the user row exists with `email_verified = false`,
    /// `profile_completed` derived from the provided name fields, and the
    /// raw email-verification token is returned for caller-side delivery.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered (audit-logged)
    /// * `DatabaseError` - Storage operation failed
    async fn signup(
        &self,
        command: SignupCommand,
        client: ClientInfo,
    ) -> Result<SignupResult, AuthError>;

    /// Verify credentials and mint a fresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password; the two
    ///   cases are indistinguishable to the caller
    /// * `DatabaseError` - Storage operation failed
    async fn login(
        &self,
        email: &str,
        password: &str,
        client: ClientInfo,
    ) -> Result<LoginResult, AuthError>;

    /// Record a logout in the audit trail.
    ///
    /// Token invalidation is client-side; there is no server session store.
    async fn logout(&self, user_id: UserId, client: ClientInfo) -> Result<(), AuthError>;

    /// Consume an email-verification token and mark the account verified.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - Token does not verify
    /// * `UserNotFound` - Token verifies but the account no longer exists
    async fn verify_email(
        &self,
        token: &str,
        client: ClientInfo,
    ) -> Result<UserProfile, AuthError>;

    /// Fetch a user's profile with institution summary.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, AuthError>;

    /// Apply a partial profile update.
    ///
    /// `profile_completed` is recomputed from the post-update name fields on
    /// every call, even when only unrelated fields change.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    async fn update_profile(
        &self,
        user_id: UserId,
        command: UpdateProfileCommand,
    ) -> Result<UserProfile, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Unique email constraint violated
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Update an existing user row.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Storage operation failed
    async fn update(&self, user: User) -> Result<User, AuthError>;

    /// Short institution view for profile assembly.
    async fn institution_summary(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<InstitutionSummary>, AuthError>;
}
