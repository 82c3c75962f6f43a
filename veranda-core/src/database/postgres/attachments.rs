//! JSONB codec for embedded attachment sequences.
//!
//! Columns hold an array of `{"data": …, "contentType": …}` objects where
//! `data` is either the base64-wrapped object or a raw byte array. Loads
//! normalize both shapes; writes always produce the base64 form.

use serde_json::Value;

use crate::{CoreError, Result};
use veranda_model::{Attachment, StoredAttachment};

pub(crate) fn attachments_to_value(attachments: &[Attachment]) -> Result<Value> {
    let stored: Vec<StoredAttachment> =
        attachments.iter().map(StoredAttachment::from).collect();
    serde_json::to_value(stored)
        .map_err(|e| CoreError::External(format!("Failed to encode attachments: {e}")))
}

pub(crate) fn attachments_from_value(value: Value) -> Result<Vec<Attachment>> {
    let stored: Vec<StoredAttachment> =
        serde_json::from_value(value).map_err(|_| CoreError::UnsupportedMediaFormat)?;
    stored
        .into_iter()
        .map(|attachment| attachment.into_attachment().map_err(CoreError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_through_the_base64_shape() {
        let attachments = vec![Attachment {
            data: vec![1, 2, 3],
            content_type: "image/png".to_string(),
        }];

        let value = attachments_to_value(&attachments).unwrap();
        assert_eq!(attachments_from_value(value).unwrap(), attachments);
    }

    #[test]
    fn accepts_the_raw_byte_array_shape() {
        let value = json!([{ "data": [4, 5, 6], "contentType": "video/mp4" }]);
        let attachments = attachments_from_value(value).unwrap();
        assert_eq!(attachments[0].data, vec![4, 5, 6]);
    }

    #[test]
    fn unrecognized_shapes_surface_as_unsupported_media() {
        let value = json!([{ "data": "plain string", "contentType": "image/png" }]);
        assert!(matches!(
            attachments_from_value(value),
            Err(CoreError::UnsupportedMediaFormat)
        ));
    }
}
