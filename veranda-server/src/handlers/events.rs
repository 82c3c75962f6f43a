//! Society event endpoints: CRUD plus positional media serving.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};
use uuid::Uuid;

use veranda_core::domain::media::parse_retained_indices;
use veranda_model::{Event, EventPatch, MediaKind};

use crate::errors::{AppError, AppResult};
use crate::handlers::{parse_datetime, serve_attachment, with_media_urls};
use crate::infra::app_state::AppState;
use crate::multipart::MediaForm;

pub async fn create_event(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Value>)> {
    let form = MediaForm::collect(multipart).await?;

    let title = form.text("title").unwrap_or_default().to_string();
    let raw_date = form.text("date").unwrap_or_default().to_string();
    let kind = form.text("type").unwrap_or_default().to_string();
    let description = form.text("description").unwrap_or_default().to_string();

    if title.is_empty() || raw_date.is_empty() || kind.is_empty() {
        return Err(AppError::bad_request(
            "Title, date and type are required fields",
        ));
    }
    let date = parse_datetime(&raw_date)
        .ok_or_else(|| AppError::bad_request("Invalid date format"))?;

    let event = Event::new(title, description, date, kind);
    let event = state.events.create(event, form.images, form.videos).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Event created successfully!",
            "event": with_media_urls(&event)?,
        })),
    ))
}

pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let events = state.events.list().await?;
    let events = events
        .iter()
        .map(with_media_urls)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(json!({ "success": true, "events": events })))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let event = state.events.get(id).await?;

    Ok(Json(json!({ "success": true, "event": with_media_urls(&event)? })))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<Value>> {
    let form = MediaForm::collect(multipart).await?;

    let mut patch = EventPatch {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        date: None,
        kind: form.text("type").map(str::to_string),
    };
    if let Some(raw_date) = form.text("date")
        && !raw_date.is_empty()
    {
        patch.date = Some(
            parse_datetime(raw_date)
                .ok_or_else(|| AppError::bad_request("Invalid date format"))?,
        );
    }

    let retained_images = parse_retained_indices(form.values("existingImages"));
    let retained_videos = parse_retained_indices(form.values("existingVideos"));

    let event = state
        .events
        .update(
            id,
            patch,
            &retained_images,
            &retained_videos,
            form.images,
            form.videos,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Event updated successfully!",
        "event": with_media_urls(&event)?,
    })))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    state.events.delete(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Event deleted successfully!",
    })))
}

pub async fn serve_event_media(
    State(state): State<AppState>,
    Path((id, kind, index)): Path<(Uuid, String, String)>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let kind =
        MediaKind::from_segment(&kind).ok_or_else(|| AppError::bad_request("Invalid media type"))?;
    let index: usize = index
        .parse()
        .map_err(|_| AppError::not_found("Media not found"))?;

    let attachment = state.events.resolve_media(id, kind, index).await?;
    Ok(serve_attachment(attachment))
}
