use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;
use veranda_model::Complaint;

#[async_trait]
pub trait ComplaintsRepository: Send + Sync {
    async fn insert(&self, complaint: &Complaint) -> Result<()>;

    /// All complaints, newest first by submission date.
    async fn fetch_all(&self) -> Result<Vec<Complaint>>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Complaint>>;

    /// Overwrite the stored row wholesale. Implementations return `NotFound`
    /// when no row matched.
    async fn replace(&self, complaint: &Complaint) -> Result<()>;

    /// Returns whether a row was actually removed.
    async fn remove(&self, id: Uuid) -> Result<bool>;
}
