//! Society events: announcements with an optional media gallery.

use crate::attachment::Attachment;
use crate::overwrite_if_present;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A society event. Owns two independent ordered attachment sequences;
/// the sequences themselves are never serialized into responses — clients
/// reach the bytes through the derived media URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip)]
    pub images: Vec<Attachment>,
    #[serde(skip)]
    pub videos: Vec<Attachment>,
}

impl Event {
    pub fn new(title: String, description: String, date: DateTime<Utc>, kind: String) -> Self {
        Event {
            id: Uuid::new_v4(),
            title,
            description,
            date,
            kind,
            images: Vec::new(),
            videos: Vec::new(),
        }
    }

    /// Apply a partial update. Absent or empty values leave the stored
    /// field unchanged; fields are never nulled by omission.
    pub fn apply(&mut self, patch: EventPatch) {
        overwrite_if_present(&mut self.title, patch.title);
        overwrite_if_present(&mut self.description, patch.description);
        if let Some(date) = patch.date {
            self.date = date;
        }
        overwrite_if_present(&mut self.kind, patch.kind);
    }
}

/// Scalar fields of an event update. Attachment changes travel separately
/// as retained indices plus new uploads.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub kind: Option<String>,
}
