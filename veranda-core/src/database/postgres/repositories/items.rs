use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::database::ports::items::ItemsRepository;
use crate::error::{CoreError, Result};
use veranda_model::{FamilyMember, Item, ItemDocument};

#[derive(Debug, Clone)]
pub struct PostgresItemsRepository {
    pool: PgPool,
}

impl PostgresItemsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: &PgRow) -> Result<Item> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CoreError::External(format!("Failed to read item id: {e}")))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| CoreError::External(format!("Failed to read item name: {e}")))?;
        let full_name: Option<String> = row
            .try_get("full_name")
            .map_err(|e| CoreError::External(format!("Failed to read item full_name: {e}")))?;
        let mobile_number: Option<String> = row
            .try_get("mobile_number")
            .map_err(|e| CoreError::External(format!("Failed to read item mobile_number: {e}")))?;
        let email: Option<String> = row
            .try_get("email")
            .map_err(|e| CoreError::External(format!("Failed to read item email: {e}")))?;
        let flat_no: Option<String> = row
            .try_get("flat_no")
            .map_err(|e| CoreError::External(format!("Failed to read item flat_no: {e}")))?;
        let wing_number: Option<String> = row
            .try_get("wing_number")
            .map_err(|e| CoreError::External(format!("Failed to read item wing_number: {e}")))?;
        let role: Option<String> = row
            .try_get("role")
            .map_err(|e| CoreError::External(format!("Failed to read item role: {e}")))?;
        let occupation: Option<String> = row
            .try_get("occupation")
            .map_err(|e| CoreError::External(format!("Failed to read item occupation: {e}")))?;
        let adhar_card: Option<String> = row
            .try_get("adhar_card")
            .map_err(|e| CoreError::External(format!("Failed to read item adhar_card: {e}")))?;
        let password: Option<String> = row
            .try_get("password")
            .map_err(|e| CoreError::External(format!("Failed to read item password: {e}")))?;
        let location: Option<String> = row
            .try_get("location")
            .map_err(|e| CoreError::External(format!("Failed to read item location: {e}")))?;
        let visit_time: Option<String> = row
            .try_get("visit_time")
            .map_err(|e| CoreError::External(format!("Failed to read item visit_time: {e}")))?;
        let relation: Option<String> = row
            .try_get("relation")
            .map_err(|e| CoreError::External(format!("Failed to read item relation: {e}")))?;
        let purpose: Option<String> = row
            .try_get("purpose")
            .map_err(|e| CoreError::External(format!("Failed to read item purpose: {e}")))?;
        let family_members_raw: Value = row
            .try_get("family_members")
            .map_err(|e| CoreError::External(format!("Failed to read item family_members: {e}")))?;
        let family_members: Vec<FamilyMember> = serde_json::from_value(family_members_raw)
            .map_err(|e| {
                CoreError::External(format!("Stored family members are malformed: {e}"))
            })?;
        let documents_raw: Value = row
            .try_get("documents")
            .map_err(|e| CoreError::External(format!("Failed to read item documents: {e}")))?;
        let documents: Vec<ItemDocument> = serde_json::from_value(documents_raw)
            .map_err(|e| CoreError::External(format!("Stored documents are malformed: {e}")))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| CoreError::External(format!("Failed to read item created_at: {e}")))?;

        Ok(Item {
            id,
            name,
            full_name,
            mobile_number,
            email,
            flat_no,
            wing_number,
            role,
            occupation,
            adhar_card,
            password,
            location,
            visit_time,
            relation,
            purpose,
            family_members,
            documents,
            created_at,
        })
    }

    fn list_to_value<T: serde::Serialize>(list: &[T], what: &str) -> Result<Value> {
        serde_json::to_value(list)
            .map_err(|e| CoreError::External(format!("Failed to encode item {what}: {e}")))
    }
}

#[async_trait]
impl ItemsRepository for PostgresItemsRepository {
    async fn insert(&self, item: &Item) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, full_name, mobile_number, email, flat_no, wing_number,
                role, occupation, adhar_card, password, location, visit_time,
                relation, purpose, family_members, documents, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.full_name)
        .bind(&item.mobile_number)
        .bind(&item.email)
        .bind(&item.flat_no)
        .bind(&item.wing_number)
        .bind(&item.role)
        .bind(&item.occupation)
        .bind(&item.adhar_card)
        .bind(&item.password)
        .bind(&item.location)
        .bind(&item.visit_time)
        .bind(&item.relation)
        .bind(&item.purpose)
        .bind(Self::list_to_value(&item.family_members, "family members")?)
        .bind(Self::list_to_value(&item.documents, "documents")?)
        .bind(item.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to create item: {e}")))?;

        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, full_name, mobile_number, email, flat_no, wing_number,
                   role, occupation, adhar_card, password, location, visit_time,
                   relation, purpose, family_members, documents, created_at
            FROM items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load items: {e}")))?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Item>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, full_name, mobile_number, email, flat_no, wing_number,
                   role, occupation, adhar_card, password, location, visit_time,
                   relation, purpose, family_members, documents, created_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to load item: {e}")))?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    async fn replace(&self, item: &Item) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = $2,
                full_name = $3,
                mobile_number = $4,
                email = $5,
                flat_no = $6,
                wing_number = $7,
                role = $8,
                occupation = $9,
                adhar_card = $10,
                password = $11,
                location = $12,
                visit_time = $13,
                relation = $14,
                purpose = $15,
                family_members = $16,
                documents = $17
            WHERE id = $1
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.full_name)
        .bind(&item.mobile_number)
        .bind(&item.email)
        .bind(&item.flat_no)
        .bind(&item.wing_number)
        .bind(&item.role)
        .bind(&item.occupation)
        .bind(&item.adhar_card)
        .bind(&item.password)
        .bind(&item.location)
        .bind(&item.visit_time)
        .bind(&item.relation)
        .bind(&item.purpose)
        .bind(Self::list_to_value(&item.family_members, "family members")?)
        .bind(Self::list_to_value(&item.documents, "documents")?)
        .execute(self.pool())
        .await
        .map_err(|e| CoreError::External(format!("Failed to update item: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("Item".to_string()));
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| CoreError::External(format!("Failed to delete item: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
