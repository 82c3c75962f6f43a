//! Multipart form collection for the media-backed resources.
//!
//! Events and properties accept `multipart/form-data` on create and update:
//! repeated `images` / `videos` file parts plus free-form text fields. This
//! module drains the stream once and hands the handlers an owned view.

use std::collections::HashMap;

use axum::extract::Multipart;

use veranda_model::UploadedFile;

use crate::errors::{AppError, AppResult};

/// Everything a media endpoint received, text fields and files separated.
///
/// Text fields keep every occurrence in arrival order, which is how the
/// repeated `existingImages` / `existingVideos` index fields come in.
#[derive(Debug, Default)]
pub struct MediaForm {
    fields: HashMap<String, Vec<String>>,
    pub images: Vec<UploadedFile>,
    pub videos: Vec<UploadedFile>,
}

impl MediaForm {
    /// Drain the multipart stream into memory.
    pub async fn collect(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "images" | "videos" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| {
                            AppError::bad_request(format!("Malformed multipart body: {e}"))
                        })?
                        .to_vec();

                    let uploaded = UploadedFile {
                        name: file_name,
                        content_type,
                        data,
                    };
                    if name == "images" {
                        form.images.push(uploaded);
                    } else {
                        form.videos.push(uploaded);
                    }
                }
                _ => {
                    let value = field.text().await.map_err(|e| {
                        AppError::bad_request(format!("Malformed multipart body: {e}"))
                    })?;
                    form.fields.entry(name).or_default().push(value);
                }
            }
        }

        Ok(form)
    }

    /// First value of a text field, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value of a repeated text field, in arrival order.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
