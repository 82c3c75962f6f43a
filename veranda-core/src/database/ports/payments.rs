use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;
use veranda_model::Payment;

/// Completed payment records. Rows are immutable once written; there is no
/// update path.
#[async_trait]
pub trait PaymentsRepository: Send + Sync {
    async fn insert(&self, payment: &Payment) -> Result<()>;

    /// All records, newest first.
    async fn fetch_all(&self) -> Result<Vec<Payment>>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Payment>>;

    /// Returns whether a row was actually removed.
    async fn remove(&self, id: Uuid) -> Result<bool>;
}
