use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::notices::NoticesRepository;
use crate::error::{CoreError, Result};
use veranda_model::{Notice, NoticeFilter, NoticeStatus};

#[derive(Debug, Clone)]
pub struct PostgresNoticesRepository {
    pool: PgPool,
}

impl PostgresNoticesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Notice> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CoreError::External(format!("Failed to read notice id: {e}")))?;
        let title: String = row
            .try_get("title")
            .map_err(|e| CoreError::External(format!("Failed to read notice title: {e}")))?;
        let message: String = row
            .try_get("message")
            .map_err(|e| CoreError::External(format!("Failed to read notice message: {e}")))?;
        let posted_by: String = row
            .try_get("posted_by")
            .map_err(|e| CoreError::External(format!("Failed to read notice posted_by: {e}")))?;
        let posted_at: DateTime<Utc> = row
            .try_get("posted_at")
            .map_err(|e| CoreError::External(format!("Failed to read notice posted_at: {e}")))?;
        let deadline: Option<DateTime<Utc>> = row
            .try_get("deadline")
            .map_err(|e| CoreError::External(format!("Failed to read notice deadline: {e}")))?;
        let audience_type: String = row.try_get("audience_type").map_err(|e| {
            CoreError::External(format!("Failed to read notice audience_type: {e}"))
        })?;
        let target_area: String = row
            .try_get("target_area")
            .map_err(|e| CoreError::External(format!("Failed to read notice target_area: {e}")))?;
        let target_users: Vec<String> = row
            .try_get("target_users")
            .map_err(|e| CoreError::External(format!("Failed to read notice target_users: {e}")))?;
        let category: String = row
            .try_get("category")
            .map_err(|e| CoreError::External(format!("Failed to read notice category: {e}")))?;
        let priority: String = row
            .try_get("priority")
            .map_err(|e| CoreError::External(format!("Failed to read notice priority: {e}")))?;
        let status_raw: String = row
            .try_get("status")
            .map_err(|e| CoreError::External(format!("Failed to read notice status: {e}")))?;
        let status = status_raw.parse::<NoticeStatus>().map_err(|_| {
            CoreError::External(format!("Stored notice status '{status_raw}' is not recognized"))
        })?;

        Ok(Notice {
            id,
            title,
            message,
            posted_by,
            posted_at,
            deadline,
            audience_type,
            target_area,
            target_users,
            category,
            priority,
            status,
        })
    }
}

#[async_trait]
impl NoticesRepository for PostgresNoticesRepository {
    async fn insert(&self, notice: &Notice) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notices (
                id, title, message, posted_by, posted_at, deadline,
                audience_type, target_area, target_users, category, priority, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(notice.id)
        .bind(&notice.title)
        .bind(&notice.message)
        .bind(&notice.posted_by)
        .bind(notice.posted_at)
        .bind(notice.deadline)
        .bind(&notice.audience_type)
        .bind(&notice.target_area)
        .bind(&notice.target_users)
        .bind(&notice.category)
        .bind(&notice.priority)
        .bind(notice.status.as_str())
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to create notice: {e}")))?;

        Ok(())
    }

    async fn fetch_filtered(&self, filter: &NoticeFilter) -> Result<Vec<Notice>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT id, title, message, posted_by, posted_at, deadline,
                   audience_type, target_area, target_users, category, priority, status
            FROM notices
            WHERE 1=1
            "#,
        );

        if let Some(audience_type) = &filter.audience_type {
            builder.push(" AND audience_type = ");
            builder.push_bind(audience_type);
        }
        if let Some(target_area) = &filter.target_area {
            builder.push(" AND target_area = ");
            builder.push_bind(target_area);
        }
        if let Some(category) = &filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category);
        }
        if let Some(priority) = &filter.priority {
            builder.push(" AND priority = ");
            builder.push_bind(priority);
        }
        if let Some(status) = &filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status);
        }

        builder.push(" ORDER BY priority DESC, posted_at DESC");

        let rows = builder
            .build()
            .fetch_all(self.pool())
            .await
            .map_err(|e| CoreError::External(format!("Failed to load notices: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Notice>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, message, posted_by, posted_at, deadline,
                   audience_type, target_area, target_users, category, priority, status
            FROM notices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load notice: {e}")))?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn replace(&self, notice: &Notice) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE notices
            SET title = $2,
                message = $3,
                posted_by = $4,
                deadline = $5,
                audience_type = $6,
                target_area = $7,
                target_users = $8,
                category = $9,
                priority = $10,
                status = $11
            WHERE id = $1
            "#,
        )
        .bind(notice.id)
        .bind(&notice.title)
        .bind(&notice.message)
        .bind(&notice.posted_by)
        .bind(notice.deadline)
        .bind(&notice.audience_type)
        .bind(&notice.target_area)
        .bind(&notice.target_users)
        .bind(&notice.category)
        .bind(&notice.priority)
        .bind(notice.status.as_str())
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to update notice: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Notice".to_string()));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::External(format!("Failed to delete notice: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
