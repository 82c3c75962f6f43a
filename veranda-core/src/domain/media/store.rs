use std::{any::type_name_of_val, fmt, sync::Arc};

use tracing::debug;
use uuid::Uuid;
use veranda_model::{Attachment, MediaKind, UploadedFile};

use crate::{
    CoreError, Result,
    database::ports::media::MediaResourceRepository,
};

use super::{
    MediaResource, UploadLimits, merge_attachments, to_attachments, validate_batch,
};

/// Provides the full attachment-carrying resource lifecycle over a
/// repository port: create with uploads, list, fetch, positional media
/// serving, the retain-and-append update merge, and cascading delete.
#[derive(Clone)]
pub struct MediaResourceStore<R>
where
    R: MediaResourceRepository + ?Sized,
{
    repository: Arc<R>,
    limits: UploadLimits,
}

impl<R> fmt::Debug for MediaResourceStore<R>
where
    R: MediaResourceRepository + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaResourceStore")
            .field("repository", &type_name_of_val(self.repository.as_ref()))
            .field("limits", &self.limits)
            .finish()
    }
}

impl<R> MediaResourceStore<R>
where
    R: MediaResourceRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            limits: UploadLimits::default(),
        }
    }

    /// Override the default upload ceilings (from configuration, or tests).
    pub fn with_limits(mut self, limits: UploadLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Direct access to the underlying repository for lookups that are not
    /// part of the shared lifecycle.
    pub fn repository(&self) -> &R {
        self.repository.as_ref()
    }

    /// Validate the upload batches, attach them to the new resource and
    /// persist it. Nothing is stored when any file is rejected.
    pub async fn create(
        &self,
        mut resource: R::Resource,
        images: Vec<UploadedFile>,
        videos: Vec<UploadedFile>,
    ) -> Result<R::Resource> {
        validate_batch(MediaKind::Image, &images, &self.limits)?;
        validate_batch(MediaKind::Video, &videos, &self.limits)?;

        resource.set_attachments(to_attachments(images), to_attachments(videos));
        self.repository.insert(&resource).await?;
        debug!(
            "created {} {}",
            R::Resource::NOUN,
            resource.id()
        );
        Ok(resource)
    }

    /// All resources, newest first.
    pub async fn list(&self) -> Result<Vec<R::Resource>> {
        self.repository.fetch_all().await
    }

    pub async fn get(&self, id: Uuid) -> Result<R::Resource> {
        self.repository
            .fetch(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(R::Resource::NOUN.to_string()))
    }

    /// Apply a scalar patch and rebuild both attachment sequences.
    ///
    /// Retained indices resolve against the currently stored sequences, in
    /// the caller's order, and new uploads are appended after them. An index
    /// that no longer resolves is skipped. The existence check runs before
    /// upload validation so an unknown id reports not-found even when the
    /// request also carries bad files.
    pub async fn update(
        &self,
        id: Uuid,
        patch: <R::Resource as MediaResource>::Patch,
        retained_images: &[usize],
        retained_videos: &[usize],
        new_images: Vec<UploadedFile>,
        new_videos: Vec<UploadedFile>,
    ) -> Result<R::Resource> {
        let mut resource = self.get(id).await?;

        validate_batch(MediaKind::Image, &new_images, &self.limits)?;
        validate_batch(MediaKind::Video, &new_videos, &self.limits)?;

        let images = merge_attachments(
            resource.images(),
            retained_images,
            to_attachments(new_images),
        );
        let videos = merge_attachments(
            resource.videos(),
            retained_videos,
            to_attachments(new_videos),
        );

        resource.apply_patch(patch);
        resource.set_attachments(images, videos);
        self.repository.replace(&resource).await?;
        debug!("updated {} {}", R::Resource::NOUN, id);
        Ok(resource)
    }

    /// Remove the resource and, with it, every embedded attachment.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repository.remove(id).await? {
            return Err(CoreError::NotFound(R::Resource::NOUN.to_string()));
        }
        debug!("deleted {} {}", R::Resource::NOUN, id);
        Ok(())
    }

    /// Fetch one attachment by kind and zero-based position.
    pub async fn resolve_media(
        &self,
        id: Uuid,
        kind: MediaKind,
        index: usize,
    ) -> Result<Attachment> {
        let resource = self.get(id).await?;
        resource
            .attachments(kind)
            .get(index)
            .cloned()
            .ok_or_else(|| CoreError::NotFound("Media".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use tokio::sync::Mutex;
    use veranda_model::{Event, EventPatch};

    struct InMemoryEvents {
        rows: Mutex<Vec<Event>>,
    }

    impl InMemoryEvents {
        fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MediaResourceRepository for InMemoryEvents {
        type Resource = Event;

        async fn insert(&self, resource: &Event) -> Result<()> {
            self.rows.lock().await.push(resource.clone());
            Ok(())
        }

        async fn fetch_all(&self) -> Result<Vec<Event>> {
            let mut rows = self.rows.lock().await.clone();
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(rows)
        }

        async fn fetch(&self, id: Uuid) -> Result<Option<Event>> {
            let rows = self.rows.lock().await;
            Ok(rows.iter().find(|event| event.id == id).cloned())
        }

        async fn replace(&self, resource: &Event) -> Result<()> {
            let mut rows = self.rows.lock().await;
            match rows.iter_mut().find(|event| event.id == resource.id) {
                Some(slot) => {
                    *slot = resource.clone();
                    Ok(())
                }
                None => Err(CoreError::NotFound("Event".to_string())),
            }
        }

        async fn remove(&self, id: Uuid) -> Result<bool> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|event| event.id != id);
            Ok(rows.len() < before)
        }
    }

    fn build_store() -> MediaResourceStore<InMemoryEvents> {
        MediaResourceStore::new(Arc::new(InMemoryEvents::new()))
    }

    fn event(title: &str, date: &str) -> Event {
        let date: DateTime<Utc> = date.parse().expect("valid test date");
        Event::new(
            title.to_string(),
            "test".to_string(),
            date,
            "meeting".to_string(),
        )
    }

    fn image(name: &str, marker: u8) -> UploadedFile {
        UploadedFile {
            name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
            data: vec![marker; 8],
        }
    }

    fn video(name: &str, marker: u8) -> UploadedFile {
        UploadedFile {
            name: Some(name.to_string()),
            content_type: Some("video/mp4".to_string()),
            data: vec![marker; 8],
        }
    }

    #[tokio::test]
    async fn create_persists_scalars_and_uploads() {
        let store = build_store();

        let created = store
            .create(
                event("AGM", "2026-03-01T10:00:00Z"),
                vec![image("a.png", 1), image("b.png", 2)],
                vec![video("walkthrough.mp4", 9)],
            )
            .await
            .expect("create event");

        assert_eq!(created.images.len(), 2);
        assert_eq!(created.videos.len(), 1);

        let listed = store.list().await.expect("list events");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "AGM");
    }

    #[tokio::test]
    async fn create_rejects_disallowed_upload_without_persisting() {
        let store = build_store();

        let pdf = UploadedFile {
            name: Some("minutes.pdf".to_string()),
            content_type: Some("application/pdf".to_string()),
            data: vec![0; 8],
        };
        let result = store
            .create(event("AGM", "2026-03-01T10:00:00Z"), vec![pdf], Vec::new())
            .await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(store.list().await.expect("list events").is_empty());
    }

    #[tokio::test]
    async fn update_merges_retained_before_new_uploads() {
        let store = build_store();

        let created = store
            .create(
                event("AGM", "2026-03-01T10:00:00Z"),
                vec![image("a.png", b'A'), image("b.png", b'B'), image("c.png", b'C')],
                Vec::new(),
            )
            .await
            .expect("create event");

        let updated = store
            .update(
                created.id,
                EventPatch::default(),
                &[2, 0],
                &[],
                vec![image("d.png", b'D')],
                Vec::new(),
            )
            .await
            .expect("update event");

        let markers: Vec<u8> = updated.images.iter().map(|a| a.data[0]).collect();
        assert_eq!(markers, vec![b'C', b'A', b'D']);
    }

    #[tokio::test]
    async fn update_without_retention_drops_stored_attachments() {
        let store = build_store();

        let created = store
            .create(
                event("AGM", "2026-03-01T10:00:00Z"),
                vec![image("a.png", 1)],
                Vec::new(),
            )
            .await
            .expect("create event");

        let updated = store
            .update(created.id, EventPatch::default(), &[], &[], Vec::new(), Vec::new())
            .await
            .expect("update event");

        assert!(updated.images.is_empty());
    }

    #[tokio::test]
    async fn update_reports_unknown_id_before_validating_uploads() {
        let store = build_store();

        let pdf = UploadedFile {
            name: Some("minutes.pdf".to_string()),
            content_type: Some("application/pdf".to_string()),
            data: vec![0; 8],
        };
        let result = store
            .update(
                Uuid::new_v4(),
                EventPatch::default(),
                &[],
                &[],
                vec![pdf],
                Vec::new(),
            )
            .await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn resolve_media_addresses_attachments_by_position() {
        let store = build_store();

        let created = store
            .create(
                event("AGM", "2026-03-01T10:00:00Z"),
                vec![image("a.png", 1), image("b.png", 2)],
                Vec::new(),
            )
            .await
            .expect("create event");

        let second = store
            .resolve_media(created.id, MediaKind::Image, 1)
            .await
            .expect("resolve image");
        assert_eq!(second.data, vec![2; 8]);
        assert_eq!(second.content_type, "image/png");

        let missing = store.resolve_media(created.id, MediaKind::Image, 5).await;
        assert!(matches!(
            missing,
            Err(CoreError::NotFound(noun)) if noun == "Media"
        ));
    }

    #[tokio::test]
    async fn delete_cascades_and_reports_missing_rows() {
        let store = build_store();

        let created = store
            .create(
                event("AGM", "2026-03-01T10:00:00Z"),
                vec![image("a.png", 1)],
                Vec::new(),
            )
            .await
            .expect("create event");

        store.delete(created.id).await.expect("delete event");
        assert!(matches!(
            store.get(created.id).await,
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete(created.id).await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = build_store();

        store
            .create(event("Older", "2026-01-01T00:00:00Z"), Vec::new(), Vec::new())
            .await
            .expect("create older");
        store
            .create(event("Newer", "2026-06-01T00:00:00Z"), Vec::new(), Vec::new())
            .await
            .expect("create newer");

        let titles: Vec<String> = store
            .list()
            .await
            .expect("list events")
            .into_iter()
            .map(|event| event.title)
            .collect();
        assert_eq!(titles, vec!["Newer".to_string(), "Older".to_string()]);
    }
}
