use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::payments::PaymentsRepository;
use crate::error::{CoreError, Result};
use veranda_model::Payment;

#[derive(Debug, Clone)]
pub struct PostgresPaymentsRepository {
    pool: PgPool,
}

impl PostgresPaymentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Payment> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CoreError::External(format!("Failed to read payment id: {e}")))?;
        let payment_id: String = row
            .try_get("payment_id")
            .map_err(|e| CoreError::External(format!("Failed to read payment_id: {e}")))?;
        let order_id: String = row
            .try_get("order_id")
            .map_err(|e| CoreError::External(format!("Failed to read order_id: {e}")))?;
        let signature: String = row
            .try_get("signature")
            .map_err(|e| CoreError::External(format!("Failed to read payment signature: {e}")))?;
        let amount: f64 = row
            .try_get("amount")
            .map_err(|e| CoreError::External(format!("Failed to read payment amount: {e}")))?;
        let currency: String = row
            .try_get("currency")
            .map_err(|e| CoreError::External(format!("Failed to read payment currency: {e}")))?;
        let customer_name: String = row
            .try_get("customer_name")
            .map_err(|e| CoreError::External(format!("Failed to read customer_name: {e}")))?;
        let customer_email: String = row
            .try_get("customer_email")
            .map_err(|e| CoreError::External(format!("Failed to read customer_email: {e}")))?;
        let customer_contact: String = row
            .try_get("customer_contact")
            .map_err(|e| CoreError::External(format!("Failed to read customer_contact: {e}")))?;
        let description: Option<String> = row
            .try_get("description")
            .map_err(|e| CoreError::External(format!("Failed to read payment description: {e}")))?;
        let status: String = row
            .try_get("status")
            .map_err(|e| CoreError::External(format!("Failed to read payment status: {e}")))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| CoreError::External(format!("Failed to read payment created_at: {e}")))?;

        Ok(Payment {
            id,
            payment_id,
            order_id,
            signature,
            amount,
            currency,
            customer_name,
            customer_email,
            customer_contact,
            description,
            status,
            created_at,
        })
    }
}

#[async_trait]
impl PaymentsRepository for PostgresPaymentsRepository {
    async fn insert(&self, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, payment_id, order_id, signature, amount, currency,
                customer_name, customer_email, customer_contact, description,
                status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(payment.id)
        .bind(&payment.payment_id)
        .bind(&payment.order_id)
        .bind(&payment.signature)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(&payment.customer_name)
        .bind(&payment.customer_email)
        .bind(&payment.customer_contact)
        .bind(&payment.description)
        .bind(&payment.status)
        .bind(payment.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to record payment: {e}")))?;

        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, payment_id, order_id, signature, amount, currency,
                   customer_name, customer_email, customer_contact, description,
                   status, created_at
            FROM payments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load payments: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query(
            r#"
            SELECT id, payment_id, order_id, signature, amount, currency,
                   customer_name, customer_email, customer_contact, description,
                   status, created_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load payment: {e}")))?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::External(format!("Failed to delete payment: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
