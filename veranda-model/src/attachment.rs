//! Embedded binary attachments and their stored encodings.
//!
//! An attachment's identity is its zero-based position inside the owning
//! resource's `images` or `videos` sequence at the time of read. The index is
//! not a stable key: any update that reorders or drops earlier entries
//! reassigns it, and the derived media URLs move with it.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which attachment sequence a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// URL path segment used by the media endpoints (`image` / `video`).
    pub fn as_segment(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Parse the media-endpoint path segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }

    /// Multipart field name carrying uploads of this kind (`images` / `videos`).
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_segment())
    }
}

/// One embedded binary unit: canonical bytes plus the content type declared
/// at upload time. The declared type is trusted as given beyond the coarse
/// prefix check applied at intake.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub data: Vec<u8>,
    pub content_type: String,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("bytes", &self.data.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Stored bytes in neither recognized encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported stored media format")]
pub struct AttachmentDecodeError;

/// The two legal persisted shapes for attachment bytes.
///
/// Writes always produce the base64-wrapped form; loads must accept the raw
/// byte-array form as well and normalize both into [`Attachment`] bytes
/// before anything downstream touches them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredBytes {
    Base64 { base64: String },
    Raw(Vec<u8>),
}

impl StoredBytes {
    /// Normalize into canonical bytes.
    pub fn into_bytes(self) -> Result<Vec<u8>, AttachmentDecodeError> {
        match self {
            StoredBytes::Base64 { base64 } => {
                STANDARD.decode(base64).map_err(|_| AttachmentDecodeError)
            }
            StoredBytes::Raw(bytes) => Ok(bytes),
        }
    }
}

/// Persisted form of an [`Attachment`].
///
/// `contentType` may be absent in rows written by earlier tooling; it
/// decodes as empty and readers fall back to a generic type when serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAttachment {
    pub data: StoredBytes,
    #[serde(default)]
    pub content_type: String,
}

impl StoredAttachment {
    /// Normalize the stored shape into the canonical in-memory attachment.
    pub fn into_attachment(self) -> Result<Attachment, AttachmentDecodeError> {
        Ok(Attachment {
            data: self.data.into_bytes()?,
            content_type: self.content_type,
        })
    }
}

impl From<&Attachment> for StoredAttachment {
    fn from(attachment: &Attachment) -> Self {
        StoredAttachment {
            data: StoredBytes::Base64 {
                base64: STANDARD.encode(&attachment.data),
            },
            content_type: attachment.content_type.clone(),
        }
    }
}

/// Derived projection mapping each attachment position to its fetch URL.
/// Never persisted; recomputed on every read because index-to-URL
/// correspondence depends on the current sequence contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUrls {
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

/// One file received from a multipart request, before validation.
#[derive(Clone)]
pub struct UploadedFile {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Name to report in validation errors when the part carried none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed file)")
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}
