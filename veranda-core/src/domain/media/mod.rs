//! The media-backed resource store: everything that gives embedded
//! attachments their behavior.
//!
//! Events and property listings carry two independent ordered attachment
//! sequences. An attachment is addressed purely by its position, so every
//! operation here is written against one invariant: a stored sequence never
//! contains a hole. Uploads are validated as a batch before anything is
//! persisted, retained indices that no longer resolve are silently dropped
//! during merges, and the URL projection is recomputed from the live
//! sequences on every read.

mod resources;
mod store;

pub use store::MediaResourceStore;

use crate::{CoreError, Result};
use uuid::Uuid;
use veranda_model::{Attachment, MediaKind, MediaUrls, UploadedFile};

/// Content type served when an attachment was stored without one.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

const BYTES_PER_MIB: usize = 1024 * 1024;

/// Per-request upload ceilings. Counts are fixed by the wire contract;
/// the per-file size ceiling is configurable. Caps apply to the files in
/// one request only, not cumulatively against already-stored attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_images: usize,
    pub max_videos: usize,
    pub max_file_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        UploadLimits {
            max_images: 5,
            max_videos: 2,
            max_file_bytes: 10 * BYTES_PER_MIB,
        }
    }
}

impl UploadLimits {
    pub fn with_max_file_mib(mut self, mib: usize) -> Self {
        self.max_file_bytes = mib * BYTES_PER_MIB;
        self
    }

    fn cap(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Image => self.max_images,
            MediaKind::Video => self.max_videos,
        }
    }
}

/// A parent entity owning positional attachment sequences.
pub trait MediaResource: Clone + Send + Sync + 'static {
    /// Noun used in error messages ("Event", "Property").
    const NOUN: &'static str;
    /// Path segment under `/api` that serves this resource ("events").
    const URL_SEGMENT: &'static str;

    /// Scalar-field partial update, applied with the
    /// overwrite-only-when-present rule.
    type Patch: Send + 'static;

    fn id(&self) -> Uuid;
    fn images(&self) -> &[Attachment];
    fn videos(&self) -> &[Attachment];
    fn set_attachments(&mut self, images: Vec<Attachment>, videos: Vec<Attachment>);
    fn apply_patch(&mut self, patch: Self::Patch);

    fn attachments(&self, kind: MediaKind) -> &[Attachment] {
        match kind {
            MediaKind::Image => self.images(),
            MediaKind::Video => self.videos(),
        }
    }
}

/// Validate one upload batch against its slot. The whole request is
/// rejected on the first offending file; nothing is persisted.
pub fn validate_batch(
    kind: MediaKind,
    files: &[UploadedFile],
    limits: &UploadLimits,
) -> Result<()> {
    let cap = limits.cap(kind);
    if files.len() > cap {
        return Err(CoreError::Validation(format!(
            "Too many {}: got {}, limit is {}",
            kind.field_name(),
            files.len(),
            cap
        )));
    }

    let expected_prefix = match kind {
        MediaKind::Image => "image/",
        MediaKind::Video => "video/",
    };
    for file in files {
        let declared = file.content_type.as_deref().unwrap_or("");
        if !declared.starts_with(expected_prefix) {
            return Err(CoreError::Validation(format!(
                "File \"{}\" has content type \"{}\", which is not allowed in the {} field",
                file.display_name(),
                declared,
                kind.field_name()
            )));
        }
        if file.data.len() > limits.max_file_bytes {
            return Err(CoreError::Validation(format!(
                "File \"{}\" exceeds the {} MiB per-file limit",
                file.display_name(),
                limits.max_file_bytes / BYTES_PER_MIB
            )));
        }
    }
    Ok(())
}

/// Convert validated uploads into attachments, in upload order.
pub fn to_attachments(files: Vec<UploadedFile>) -> Vec<Attachment> {
    files
        .into_iter()
        .map(|file| Attachment {
            content_type: file
                .content_type
                .unwrap_or_else(|| APPLICATION_OCTET_STREAM.to_string()),
            data: file.data,
        })
        .collect()
}

/// Parse `existingImages` / `existingVideos` form values into retained
/// indices.
///
/// Clients send either one JSON-encoded array or the same field repeated
/// per index. Malformed encodings mean "retain nothing" rather than an
/// error; a bare integer is accepted as a one-element array. Range
/// checking happens later, in [`merge_attachments`].
pub fn parse_retained_indices(values: &[String]) -> Vec<usize> {
    match values {
        [] => Vec::new(),
        [single] => match serde_json::from_str::<serde_json::Value>(single) {
            Ok(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_u64().map(|i| i as usize))
                .collect(),
            Ok(serde_json::Value::Number(n)) => {
                n.as_u64().map(|i| i as usize).into_iter().collect()
            }
            _ => Vec::new(),
        },
        many => many
            .iter()
            .filter_map(|value| value.trim().parse::<usize>().ok())
            .collect(),
    }
}

/// The merge law for updates: retained attachments first, in the caller's
/// order, then new uploads in upload order. Out-of-range retained indices
/// are dropped silently so the result never contains a hole.
pub fn merge_attachments(
    existing: &[Attachment],
    retained: &[usize],
    uploaded: Vec<Attachment>,
) -> Vec<Attachment> {
    let mut merged: Vec<Attachment> = retained
        .iter()
        .filter_map(|&index| existing.get(index).cloned())
        .collect();
    merged.extend(uploaded);
    merged
}

/// Recompute the URL projection for a resource's current sequences.
pub fn media_urls<R: MediaResource>(resource: &R) -> MediaUrls {
    let urls = |kind: MediaKind, count: usize| {
        (0..count)
            .map(|index| {
                format!(
                    "/api/{}/media/{}/{}/{}",
                    R::URL_SEGMENT,
                    resource.id(),
                    kind.as_segment(),
                    index
                )
            })
            .collect()
    };
    MediaUrls {
        images: urls(MediaKind::Image, resource.images().len()),
        videos: urls(MediaKind::Video, resource.videos().len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veranda_model::Event;

    fn attachment(marker: u8) -> Attachment {
        Attachment {
            data: vec![marker; 4],
            content_type: "image/png".to_string(),
        }
    }

    fn upload(name: &str, content_type: &str, bytes: usize) -> UploadedFile {
        UploadedFile {
            name: Some(name.to_string()),
            content_type: Some(content_type.to_string()),
            data: vec![0xAB; bytes],
        }
    }

    #[test]
    fn merge_keeps_retained_in_caller_order_then_appends_uploads() {
        let existing = vec![attachment(b'A'), attachment(b'B'), attachment(b'C')];
        let merged = merge_attachments(&existing, &[2, 0], vec![attachment(b'D')]);
        let markers: Vec<u8> = merged.iter().map(|a| a.data[0]).collect();
        assert_eq!(markers, vec![b'C', b'A', b'D']);
    }

    #[test]
    fn merge_drops_out_of_range_indices_silently() {
        let existing = vec![attachment(b'A'), attachment(b'B'), attachment(b'C')];
        assert!(merge_attachments(&existing, &[5], Vec::new()).is_empty());

        let merged = merge_attachments(&existing, &[1, 7, 0], Vec::new());
        let markers: Vec<u8> = merged.iter().map(|a| a.data[0]).collect();
        assert_eq!(markers, vec![b'B', b'A']);
    }

    #[test]
    fn retained_indices_accept_json_arrays_and_repeated_fields() {
        assert_eq!(
            parse_retained_indices(&["[2, 0]".to_string()]),
            vec![2, 0]
        );
        assert_eq!(
            parse_retained_indices(&["1".to_string(), "3".to_string()]),
            vec![1, 3]
        );
        assert_eq!(parse_retained_indices(&["2".to_string()]), vec![2]);
    }

    #[test]
    fn malformed_retained_indices_mean_retain_nothing() {
        assert!(parse_retained_indices(&[]).is_empty());
        assert!(parse_retained_indices(&["oops".to_string()]).is_empty());
        assert!(parse_retained_indices(&["{\"a\":1}".to_string()]).is_empty());
        // Negative and fractional entries inside an otherwise valid array
        // are dropped, not fatal.
        assert_eq!(
            parse_retained_indices(&["[1, -3, 0.5, 2]".to_string()]),
            vec![1, 2]
        );
    }

    #[test]
    fn batch_validation_rejects_wrong_content_type_naming_the_file() {
        let files = vec![upload("a.png", "image/png", 8), upload("b.pdf", "application/pdf", 8)];
        let err = validate_batch(MediaKind::Image, &files, &UploadLimits::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("b.pdf"), "message should name the file: {message}");
        assert!(message.contains("application/pdf"));
    }

    #[test]
    fn batch_validation_enforces_per_request_counts() {
        let images: Vec<_> = (0..6).map(|i| upload(&format!("{i}.png"), "image/png", 8)).collect();
        assert!(validate_batch(MediaKind::Image, &images, &UploadLimits::default()).is_err());

        let videos: Vec<_> = (0..3).map(|i| upload(&format!("{i}.mp4"), "video/mp4", 8)).collect();
        assert!(validate_batch(MediaKind::Video, &videos, &UploadLimits::default()).is_err());

        let ok: Vec<_> = (0..5).map(|i| upload(&format!("{i}.png"), "image/png", 8)).collect();
        assert!(validate_batch(MediaKind::Image, &ok, &UploadLimits::default()).is_ok());
    }

    #[test]
    fn batch_validation_enforces_the_per_file_size_ceiling() {
        let limits = UploadLimits::default().with_max_file_mib(1);
        let files = vec![upload("big.png", "image/png", BYTES_PER_MIB + 1)];
        let err = validate_batch(MediaKind::Image, &files, &limits).unwrap_err();
        assert!(err.to_string().contains("big.png"));
    }

    #[test]
    fn media_urls_are_positional_and_relative() {
        let mut event = Event::new(
            "AGM".to_string(),
            String::new(),
            "2026-03-01T10:00:00Z".parse().unwrap(),
            "meeting".to_string(),
        );
        event.images = vec![attachment(1), attachment(2)];
        event.videos = vec![attachment(3)];

        let urls = media_urls(&event);
        assert_eq!(
            urls.images,
            vec![
                format!("/api/events/media/{}/image/0", event.id),
                format!("/api/events/media/{}/image/1", event.id),
            ]
        );
        assert_eq!(urls.videos, vec![format!("/api/events/media/{}/video/0", event.id)]);
    }

    #[test]
    fn uploads_without_a_declared_type_fall_back_to_octet_stream() {
        let attachments = to_attachments(vec![UploadedFile {
            name: None,
            content_type: None,
            data: vec![1, 2],
        }]);
        assert_eq!(attachments[0].content_type, APPLICATION_OCTET_STREAM);
    }
}
