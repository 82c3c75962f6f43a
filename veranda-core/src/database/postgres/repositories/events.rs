use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::media::MediaResourceRepository;
use crate::database::postgres::attachments::{attachments_from_value, attachments_to_value};
use crate::error::{CoreError, Result};
use veranda_model::Event;

#[derive(Debug, Clone)]
pub struct PostgresEventsRepository {
    pool: PgPool,
}

impl PostgresEventsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Event> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CoreError::External(format!("Failed to read event id: {e}")))?;
        let title: String = row
            .try_get("title")
            .map_err(|e| CoreError::External(format!("Failed to read event title: {e}")))?;
        let description: String = row
            .try_get("description")
            .map_err(|e| CoreError::External(format!("Failed to read event description: {e}")))?;
        let date: DateTime<Utc> = row
            .try_get("date")
            .map_err(|e| CoreError::External(format!("Failed to read event date: {e}")))?;
        let kind: String = row
            .try_get("kind")
            .map_err(|e| CoreError::External(format!("Failed to read event kind: {e}")))?;
        let images: Value = row
            .try_get("images")
            .map_err(|e| CoreError::External(format!("Failed to read event images: {e}")))?;
        let videos: Value = row
            .try_get("videos")
            .map_err(|e| CoreError::External(format!("Failed to read event videos: {e}")))?;

        Ok(Event {
            id,
            title,
            description,
            date,
            kind,
            images: attachments_from_value(images)?,
            videos: attachments_from_value(videos)?,
        })
    }
}

#[async_trait]
impl MediaResourceRepository for PostgresEventsRepository {
    type Resource = Event;

    async fn insert(&self, event: &Event) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events (id, title, description, date, kind, images, videos)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.kind)
        .bind(attachments_to_value(&event.images)?)
        .bind(attachments_to_value(&event.videos)?)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to create event: {e}")))?;

        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, date, kind, images, videos
            FROM events
            ORDER BY date DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load events: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, date, kind, images, videos
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load event: {e}")))?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn replace(&self, event: &Event) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2,
                description = $3,
                date = $4,
                kind = $5,
                images = $6,
                videos = $7
            WHERE id = $1
            "#,
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.kind)
        .bind(attachments_to_value(&event.images)?)
        .bind(attachments_to_value(&event.videos)?)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to update event: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Event".to_string()));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::External(format!("Failed to delete event: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
