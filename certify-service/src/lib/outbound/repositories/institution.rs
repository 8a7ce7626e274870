use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::institution::errors::InstitutionError;
use crate::domain::institution::models::Institution;
use crate::domain::institution::models::InstitutionId;
use crate::domain::institution::models::InstitutionPage;
use crate::domain::institution::models::InstitutionStatus;
use crate::domain::institution::models::Slug;
use crate::domain::institution::ports::InstitutionRepository;

const INSTITUTION_COLUMNS: &str = "id, slug, name, registration_number, contact_email, \
     website, city, country, status, created_at, updated_at";

pub struct PostgresInstitutionRepository {
    pool: PgPool,
}

impl PostgresInstitutionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_institution(row: &PgRow) -> Result<Institution, InstitutionError> {
        let status_str: String = Self::get(row, "status")?;
        let status = InstitutionStatus::parse(&status_str).ok_or_else(|| {
            InstitutionError::DatabaseError(format!("Unknown status value: {}", status_str))
        })?;

        Ok(Institution {
            id: InstitutionId(Self::get(row, "id")?),
            slug: Slug::new(Self::get(row, "slug")?)?,
            name: Self::get(row, "name")?,
            registration_number: Self::get(row, "registration_number")?,
            contact_email: Self::get(row, "contact_email")?,
            website: Self::get(row, "website")?,
            city: Self::get(row, "city")?,
            country: Self::get(row, "country")?,
            status,
            created_at: Self::get::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::get::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
        row: &'r PgRow,
        column: &str,
    ) -> Result<T, InstitutionError> {
        row.try_get(column)
            .map_err(|e| InstitutionError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl InstitutionRepository for PostgresInstitutionRepository {
    async fn create(&self, institution: &Institution) -> Result<(), InstitutionError> {
        sqlx::query(
            r#"
            INSERT INTO institutions (id, slug, name, registration_number, contact_email,
                                      website, city, country, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(institution.id.0)
        .bind(institution.slug.as_str())
        .bind(&institution.name)
        .bind(&institution.registration_number)
        .bind(&institution.contact_email)
        .bind(&institution.website)
        .bind(&institution.city)
        .bind(&institution.country)
        .bind(institution.status.as_str())
        .bind(institution.created_at)
        .bind(institution.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("institutions_slug_key")
                {
                    return InstitutionError::DuplicateSlug;
                }
            }
            InstitutionError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &InstitutionId,
    ) -> Result<Option<Institution>, InstitutionError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM institutions WHERE id = $1",
            INSTITUTION_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InstitutionError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_institution).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Institution>, InstitutionError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM institutions WHERE slug = $1",
            INSTITUTION_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InstitutionError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_institution).transpose()
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<InstitutionPage, InstitutionError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM institutions ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            INSTITUTION_COLUMNS
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InstitutionError::DatabaseError(e.to_string()))?;

        let institutions = rows
            .iter()
            .map(Self::row_to_institution)
            .collect::<Result<Vec<_>, _>>()?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM institutions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| InstitutionError::DatabaseError(e.to_string()))?;

        Ok(InstitutionPage {
            institutions,
            total: total as u64,
        })
    }

    async fn update(&self, institution: &Institution) -> Result<(), InstitutionError> {
        let result = sqlx::query(
            r#"
            UPDATE institutions
            SET slug = $2, name = $3, registration_number = $4, contact_email = $5,
                website = $6, city = $7, country = $8, status = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(institution.id.0)
        .bind(institution.slug.as_str())
        .bind(&institution.name)
        .bind(&institution.registration_number)
        .bind(&institution.contact_email)
        .bind(&institution.website)
        .bind(&institution.city)
        .bind(&institution.country)
        .bind(institution.status.as_str())
        .bind(institution.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("institutions_slug_key")
                {
                    return InstitutionError::DuplicateSlug;
                }
            }
            InstitutionError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(InstitutionError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: &InstitutionId) -> Result<(), InstitutionError> {
        let result = sqlx::query("DELETE FROM institutions WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| InstitutionError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(InstitutionError::NotFound);
        }

        Ok(())
    }
}
