use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::complaints::ComplaintsRepository;
use crate::error::{CoreError, Result};
use veranda_model::{Complaint, ComplaintStatus, EvidenceImage};

#[derive(Debug, Clone)]
pub struct PostgresComplaintsRepository {
    pool: PgPool,
}

impl PostgresComplaintsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Complaint> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CoreError::External(format!("Failed to read complaint id: {e}")))?;
        let username: String = row
            .try_get("username")
            .map_err(|e| CoreError::External(format!("Failed to read complaint username: {e}")))?;
        let flat_no: String = row
            .try_get("flat_no")
            .map_err(|e| CoreError::External(format!("Failed to read complaint flat_no: {e}")))?;
        let wing: String = row
            .try_get("wing")
            .map_err(|e| CoreError::External(format!("Failed to read complaint wing: {e}")))?;
        let subject: String = row
            .try_get("subject")
            .map_err(|e| CoreError::External(format!("Failed to read complaint subject: {e}")))?;
        let description: String = row.try_get("description").map_err(|e| {
            CoreError::External(format!("Failed to read complaint description: {e}"))
        })?;
        let status_raw: String = row
            .try_get("status")
            .map_err(|e| CoreError::External(format!("Failed to read complaint status: {e}")))?;
        let status = status_raw.parse::<ComplaintStatus>().map_err(|_| {
            CoreError::External(format!("Stored complaint status '{status_raw}' is not recognized"))
        })?;
        let admin_response: String = row.try_get("admin_response").map_err(|e| {
            CoreError::External(format!("Failed to read complaint admin_response: {e}"))
        })?;
        let submitted_date: DateTime<Utc> = row.try_get("submitted_date").map_err(|e| {
            CoreError::External(format!("Failed to read complaint submitted_date: {e}"))
        })?;
        let evidence_raw: Option<Value> = row.try_get("evidence_image").map_err(|e| {
            CoreError::External(format!("Failed to read complaint evidence_image: {e}"))
        })?;
        let evidence_image: Option<EvidenceImage> = evidence_raw
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                CoreError::External(format!("Stored complaint evidence is malformed: {e}"))
            })?;

        Ok(Complaint {
            id,
            username,
            flat_no,
            wing,
            subject,
            description,
            status,
            admin_response,
            submitted_date,
            evidence_image,
        })
    }

    fn evidence_to_value(evidence: &Option<EvidenceImage>) -> Result<Option<Value>> {
        evidence
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| CoreError::External(format!("Failed to encode complaint evidence: {e}")))
    }
}

#[async_trait]
impl ComplaintsRepository for PostgresComplaintsRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO complaints (
                id, username, flat_no, wing, subject, description,
                status, admin_response, submitted_date, evidence_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(complaint.id)
        .bind(&complaint.username)
        .bind(&complaint.flat_no)
        .bind(&complaint.wing)
        .bind(&complaint.subject)
        .bind(&complaint.description)
        .bind(complaint.status.as_str())
        .bind(&complaint.admin_response)
        .bind(complaint.submitted_date)
        .bind(Self::evidence_to_value(&complaint.evidence_image)?)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to create complaint: {e}")))?;

        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Complaint>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, flat_no, wing, subject, description,
                   status, admin_response, submitted_date, evidence_image
            FROM complaints
            ORDER BY submitted_date DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load complaints: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Complaint>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, flat_no, wing, subject, description,
                   status, admin_response, submitted_date, evidence_image
            FROM complaints
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load complaint: {e}")))?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn replace(&self, complaint: &Complaint) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE complaints
            SET subject = $2,
                description = $3,
                status = $4,
                admin_response = $5,
                evidence_image = $6
            WHERE id = $1
            "#,
        )
        .bind(complaint.id)
        .bind(&complaint.subject)
        .bind(&complaint.description)
        .bind(complaint.status.as_str())
        .bind(&complaint.admin_response)
        .bind(Self::evidence_to_value(&complaint.evidence_image)?)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to update complaint: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Complaint".to_string()));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM complaints WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::External(format!("Failed to delete complaint: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
