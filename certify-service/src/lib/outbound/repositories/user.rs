use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::InstitutionSummary;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::UserRole;
use crate::domain::auth::ports::UserRepository;
use crate::domain::institution::models::InstitutionId;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, role, \
     email_verified, profile_completed, email_verify_token, institution_id, \
     created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, AuthError> {
        let role_str: String = row
            .try_get("role")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        let role = UserRole::parse(&role_str)
            .ok_or_else(|| AuthError::DatabaseError(format!("Unknown role value: {}", role_str)))?;

        let email: String = row
            .try_get("email")
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: UserId(Self::get(row, "id")?),
            email: EmailAddress::new(email)?,
            password_hash: Self::get(row, "password_hash")?,
            first_name: Self::get(row, "first_name")?,
            last_name: Self::get(row, "last_name")?,
            role,
            email_verified: Self::get(row, "email_verified")?,
            profile_completed: Self::get(row, "profile_completed")?,
            email_verify_token: Self::get(row, "email_verify_token")?,
            institution_id: Self::get::<Option<Uuid>>(row, "institution_id")?.map(InstitutionId),
            created_at: Self::get::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::get::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
        row: &'r PgRow,
        column: &str,
    ) -> Result<T, AuthError> {
        row.try_get(column)
            .map_err(|e| AuthError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, role,
                               email_verified, profile_completed, email_verify_token,
                               institution_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.email_verified)
        .bind(user.profile_completed)
        .bind(&user.email_verify_token)
        .bind(user.institution_id.map(|id| id.0))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return AuthError::DuplicateEmail;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, first_name = $4, last_name = $5,
                role = $6, email_verified = $7, profile_completed = $8,
                email_verify_token = $9, institution_id = $10, updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.email_verified)
        .bind(user.profile_completed)
        .bind(&user.email_verify_token)
        .bind(user.institution_id.map(|id| id.0))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(user)
    }

    async fn institution_summary(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<InstitutionSummary>, AuthError> {
        let row = sqlx::query("SELECT id, slug, name FROM institutions WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.map(|r| {
            Ok(InstitutionSummary {
                id: InstitutionId(Self::get(&r, "id")?),
                slug: Self::get(&r, "slug")?,
                name: Self::get(&r, "name")?,
            })
        })
        .transpose()
    }
}
