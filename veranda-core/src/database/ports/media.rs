use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;
use crate::domain::media::MediaResource;
use veranda_model::Property;

/// Persistence port shared by every attachment-carrying resource.
///
/// Attachment sequences are stored embedded in the parent row, so removing
/// the row removes its media with it and `replace` swaps scalars and
/// attachments in one statement.
#[async_trait]
pub trait MediaResourceRepository: Send + Sync {
    type Resource: MediaResource;

    async fn insert(&self, resource: &Self::Resource) -> Result<()>;

    /// All rows, newest first by the resource's natural timestamp.
    async fn fetch_all(&self) -> Result<Vec<Self::Resource>>;

    async fn fetch(&self, id: Uuid) -> Result<Option<Self::Resource>>;

    /// Overwrite the stored row wholesale. Implementations return `NotFound`
    /// when no row matched.
    async fn replace(&self, resource: &Self::Resource) -> Result<()>;

    /// Returns whether a row was actually removed.
    async fn remove(&self, id: Uuid) -> Result<bool>;
}

/// Property listings additionally support lookup by the lister's mobile
/// number.
#[async_trait]
pub trait PropertiesRepository: MediaResourceRepository<Resource = Property> {
    async fn fetch_by_mobile(&self, mobile_number: &str) -> Result<Vec<Property>>;
}
