use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::media::{MediaResourceRepository, PropertiesRepository};
use crate::database::postgres::attachments::{attachments_from_value, attachments_to_value};
use crate::error::{CoreError, Result};
use veranda_model::{ListingType, Property};

#[derive(Debug, Clone)]
pub struct PostgresPropertiesRepository {
    pool: PgPool,
}

impl PostgresPropertiesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Property> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CoreError::External(format!("Failed to read property id: {e}")))?;
        let flat_no: String = row
            .try_get("flat_no")
            .map_err(|e| CoreError::External(format!("Failed to read property flat_no: {e}")))?;
        let wing: String = row
            .try_get("wing")
            .map_err(|e| CoreError::External(format!("Failed to read property wing: {e}")))?;
        let user_name: String = row
            .try_get("user_name")
            .map_err(|e| CoreError::External(format!("Failed to read property user_name: {e}")))?;
        let mobile_number: String = row.try_get("mobile_number").map_err(|e| {
            CoreError::External(format!("Failed to read property mobile_number: {e}"))
        })?;
        let price: f64 = row
            .try_get("price")
            .map_err(|e| CoreError::External(format!("Failed to read property price: {e}")))?;
        let listing_type_raw: String = row.try_get("listing_type").map_err(|e| {
            CoreError::External(format!("Failed to read property listing_type: {e}"))
        })?;
        let listing_type = listing_type_raw.parse::<ListingType>().map_err(|_| {
            CoreError::External(format!(
                "Stored listing type '{listing_type_raw}' is not recognized"
            ))
        })?;
        let eligibility: Option<String> = row.try_get("eligibility").map_err(|e| {
            CoreError::External(format!("Failed to read property eligibility: {e}"))
        })?;
        let visit_time: Option<String> = row
            .try_get("visit_time")
            .map_err(|e| CoreError::External(format!("Failed to read property visit_time: {e}")))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| CoreError::External(format!("Failed to read property created_at: {e}")))?;
        let images: Value = row
            .try_get("images")
            .map_err(|e| CoreError::External(format!("Failed to read property images: {e}")))?;
        let videos: Value = row
            .try_get("videos")
            .map_err(|e| CoreError::External(format!("Failed to read property videos: {e}")))?;

        Ok(Property {
            id,
            flat_no,
            wing,
            user_name,
            mobile_number,
            price,
            listing_type,
            eligibility,
            visit_time,
            created_at,
            images: attachments_from_value(images)?,
            videos: attachments_from_value(videos)?,
        })
    }
}

#[async_trait]
impl MediaResourceRepository for PostgresPropertiesRepository {
    type Resource = Property;

    async fn insert(&self, property: &Property) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO properties (
                id, flat_no, wing, user_name, mobile_number, price,
                listing_type, eligibility, visit_time, created_at, images, videos
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(property.id)
        .bind(&property.flat_no)
        .bind(&property.wing)
        .bind(&property.user_name)
        .bind(&property.mobile_number)
        .bind(property.price)
        .bind(property.listing_type.as_str())
        .bind(&property.eligibility)
        .bind(&property.visit_time)
        .bind(property.created_at)
        .bind(attachments_to_value(&property.images)?)
        .bind(attachments_to_value(&property.videos)?)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to create property: {e}")))?;

        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query(
            r#"
            SELECT id, flat_no, wing, user_name, mobile_number, price,
                   listing_type, eligibility, visit_time, created_at, images, videos
            FROM properties
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load properties: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Property>> {
        let row = sqlx::query(
            r#"
            SELECT id, flat_no, wing, user_name, mobile_number, price,
                   listing_type, eligibility, visit_time, created_at, images, videos
            FROM properties
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load property: {e}")))?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn replace(&self, property: &Property) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET flat_no = $2,
                wing = $3,
                user_name = $4,
                mobile_number = $5,
                price = $6,
                listing_type = $7,
                eligibility = $8,
                visit_time = $9,
                images = $10,
                videos = $11
            WHERE id = $1
            "#,
        )
        .bind(property.id)
        .bind(&property.flat_no)
        .bind(&property.wing)
        .bind(&property.user_name)
        .bind(&property.mobile_number)
        .bind(property.price)
        .bind(property.listing_type.as_str())
        .bind(&property.eligibility)
        .bind(&property.visit_time)
        .bind(attachments_to_value(&property.images)?)
        .bind(attachments_to_value(&property.videos)?)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to update property: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Property".to_string()));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::External(format!("Failed to delete property: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PropertiesRepository for PostgresPropertiesRepository {
    async fn fetch_by_mobile(&self, mobile_number: &str) -> Result<Vec<Property>> {
        let rows = sqlx::query(
            r#"
            SELECT id, flat_no, wing, user_name, mobile_number, price,
                   listing_type, eligibility, visit_time, created_at, images, videos
            FROM properties
            WHERE mobile_number = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(mobile_number)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            CoreError::External(format!("Failed to load properties by mobile number: {e}"))
        })?;

        rows.iter().map(Self::map_row).collect()
    }
}
