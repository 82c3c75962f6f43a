use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;
use veranda_model::Item;

#[async_trait]
pub trait ItemsRepository: Send + Sync {
    async fn insert(&self, item: &Item) -> Result<()>;

    /// All items, newest first by registration date.
    async fn fetch_all(&self) -> Result<Vec<Item>>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Item>>;

    /// Overwrite the stored row wholesale. Implementations return `NotFound`
    /// when no row matched.
    async fn replace(&self, item: &Item) -> Result<()>;

    /// Returns whether a row was actually removed.
    async fn remove(&self, id: Uuid) -> Result<bool>;
}
