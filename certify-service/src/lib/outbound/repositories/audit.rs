use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::audit::models::AuthEvent;
use crate::domain::audit::models::AuthEventKind;
use crate::domain::audit::models::AuthEventQuery;
use crate::domain::audit::ports::AuditLog;
use crate::domain::audit::ports::AuditLogError;
use crate::domain::auth::models::UserId;

pub struct PostgresAuditLog {
    pool: PgPool,
}

impl PostgresAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &PgRow) -> Result<AuthEvent, AuditLogError> {
        let kind_str: String = Self::get(row, "event")?;
        let kind = AuthEventKind::parse(&kind_str).ok_or_else(|| {
            AuditLogError::DatabaseError(format!("Unknown event kind: {}", kind_str))
        })?;

        Ok(AuthEvent {
            id: Self::get(row, "id")?,
            kind,
            user_id: Self::get::<Option<Uuid>>(row, "user_id")?.map(UserId),
            ip_address: Self::get(row, "ip_address")?,
            user_agent: Self::get(row, "user_agent")?,
            metadata: Self::get(row, "metadata")?,
            created_at: Self::get::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
        row: &'r PgRow,
        column: &str,
    ) -> Result<T, AuditLogError> {
        row.try_get(column)
            .map_err(|e| AuditLogError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl AuditLog for PostgresAuditLog {
    async fn record(&self, event: AuthEvent) -> Result<(), AuditLogError> {
        sqlx::query(
            r#"
            INSERT INTO auth_logs (id, event, user_id, ip_address, user_agent, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id)
        .bind(event.kind.as_str())
        .bind(event.user_id.map(|id| id.0))
        .bind(&event.ip_address)
        .bind(&event.user_agent)
        .bind(&event.metadata)
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditLogError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn query(
        &self,
        query: AuthEventQuery,
    ) -> Result<(Vec<AuthEvent>, u64), AuditLogError> {
        let kind = query.kind.map(|k| k.as_str());
        let user_id = query.user_id.map(|id| id.0);
        let limit = i64::from(query.limit.max(1));
        let offset = i64::from(query.page.max(1) - 1) * limit;

        let rows = sqlx::query(
            r#"
            SELECT id, event, user_id, ip_address, user_agent, metadata, created_at
            FROM auth_logs
            WHERE ($1::text IS NULL OR event = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(kind)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuditLogError::DatabaseError(e.to_string()))?;

        let events = rows
            .iter()
            .map(Self::row_to_event)
            .collect::<Result<Vec<_>, _>>()?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM auth_logs
            WHERE ($1::text IS NULL OR event = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            "#,
        )
        .bind(kind)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuditLogError::DatabaseError(e.to_string()))?;

        Ok((events, total as u64))
    }
}
