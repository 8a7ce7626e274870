use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::certificate::errors::CertificateError;
use crate::domain::certificate::models::CertificateData;
use crate::domain::certificate::models::CertificateId;
use crate::domain::certificate::ports::CertificateStore;

/// Postgres-backed append-only certificate store.
///
/// The digest and the data snapshot live in one row keyed by the
/// certificate id; no update or delete statements exist here.
pub struct PostgresCertificateStore {
    pool: PgPool,
}

impl PostgresCertificateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &PgRow) -> Result<(String, CertificateData), CertificateError> {
        let data = CertificateData {
            certificate_id: CertificateId::from_string(Self::get::<String>(
                row,
                "certificate_id",
            )?),
            student_name: Self::get(row, "student_name")?,
            cohort: Self::get(row, "cohort")?,
            email: Self::get(row, "email")?,
            issue_date: Self::get::<DateTime<Utc>>(row, "issue_date")?,
            issuer_name: Self::get(row, "issuer_name")?,
            course_title: Self::get(row, "course_title")?,
            blockchain_tx: Self::get(row, "blockchain_tx")?,
        };

        Ok((Self::get(row, "signature")?, data))
    }

    fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
        row: &'r PgRow,
        column: &str,
    ) -> Result<T, CertificateError> {
        row.try_get(column)
            .map_err(|e| CertificateError::Store(e.to_string()))
    }
}

#[async_trait]
impl CertificateStore for PostgresCertificateStore {
    async fn put(
        &self,
        id: &CertificateId,
        signature: &str,
        data: &CertificateData,
    ) -> Result<(), CertificateError> {
        sqlx::query(
            r#"
            INSERT INTO certificates (certificate_id, signature, student_name, cohort,
                                      email, issue_date, issuer_name, course_title,
                                      blockchain_tx)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id.as_str())
        .bind(signature)
        .bind(&data.student_name)
        .bind(&data.cohort)
        .bind(&data.email)
        .bind(data.issue_date)
        .bind(&data.issuer_name)
        .bind(&data.course_title)
        .bind(&data.blockchain_tx)
        .execute(&self.pool)
        .await
        .map_err(|e| CertificateError::Store(e.to_string()))?;

        Ok(())
    }

    async fn get(
        &self,
        id: &CertificateId,
    ) -> Result<Option<(String, CertificateData)>, CertificateError> {
        let row = sqlx::query(
            r#"
            SELECT certificate_id, signature, student_name, cohort, email,
                   issue_date, issuer_name, course_title, blockchain_tx
            FROM certificates
            WHERE certificate_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CertificateError::Store(e.to_string()))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }
}
