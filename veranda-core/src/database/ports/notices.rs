use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;
use veranda_model::{Notice, NoticeFilter};

#[async_trait]
pub trait NoticesRepository: Send + Sync {
    async fn insert(&self, notice: &Notice) -> Result<()>;

    /// Notices matching every filter the caller supplied, ordered by the raw
    /// priority string descending, then newest first. An empty filter
    /// returns everything.
    async fn fetch_filtered(&self, filter: &NoticeFilter) -> Result<Vec<Notice>>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Notice>>;

    /// Overwrite the stored row wholesale. Implementations return `NotFound`
    /// when no row matched.
    async fn replace(&self, notice: &Notice) -> Result<()>;

    /// Returns whether a row was actually removed.
    async fn remove(&self, id: Uuid) -> Result<bool>;
}
