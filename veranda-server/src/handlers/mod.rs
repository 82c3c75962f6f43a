//! Request handlers for the public API, grouped by resource.

pub mod complaints;
pub mod events;
pub mod items;
pub mod notices;
pub mod payments;
pub mod properties;

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

use veranda_core::domain::media::{APPLICATION_OCTET_STREAM, MediaResource, media_urls};
use veranda_model::Attachment;

use crate::errors::{AppError, AppResult};

/// Serialize a media-backed resource with its derived `mediaUrls` block.
pub(crate) fn with_media_urls<R>(resource: &R) -> AppResult<Value>
where
    R: MediaResource + serde::Serialize,
{
    let urls = serde_json::to_value(media_urls(resource))
        .map_err(|e| AppError::internal(format!("Failed to serialize media URLs: {e}")))?;
    let mut value = serde_json::to_value(resource)
        .map_err(|e| AppError::internal(format!("Failed to serialize {}: {e}", R::NOUN)))?;
    if let Value::Object(map) = &mut value {
        map.insert("mediaUrls".to_string(), urls);
    }
    Ok(value)
}

/// Raw attachment bytes under their stored content type.
pub(crate) fn serve_attachment(attachment: Attachment) -> (HeaderMap, Vec<u8>) {
    let content_type = if attachment.content_type.is_empty() {
        HeaderValue::from_static(APPLICATION_OCTET_STREAM)
    } else {
        HeaderValue::from_str(&attachment.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(APPLICATION_OCTET_STREAM))
    };
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type);
    (headers, attachment.data)
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`, and bare
/// `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = raw.parse::<DateTime<Utc>>() {
        return Some(parsed);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
