//! Property listing endpoints. Media behavior is shared with events; the
//! extra surface here is the per-resident listing lookup by mobile number.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};
use uuid::Uuid;

use veranda_core::domain::media::parse_retained_indices;
use veranda_model::{ListingType, MediaKind, Property, PropertyPatch};

use crate::errors::{AppError, AppResult};
use crate::handlers::{serve_attachment, with_media_urls};
use crate::infra::app_state::AppState;
use crate::multipart::MediaForm;

pub async fn create_property(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Value>)> {
    let form = MediaForm::collect(multipart).await?;

    let flat_no = form.text("flatNo").unwrap_or_default().to_string();
    let wing = form.text("wing").unwrap_or_default().to_string();
    let user_name = form.text("userName").unwrap_or_default().to_string();
    let mobile_number = form.text("mobileNumber").unwrap_or_default().to_string();
    let raw_price = form.text("price").unwrap_or_default().to_string();
    let raw_type = form.text("type").unwrap_or_default().to_string();
    let eligibility = form
        .text("eligibility")
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let visit_time = form
        .text("visitTime")
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    if flat_no.is_empty()
        || wing.is_empty()
        || user_name.is_empty()
        || mobile_number.is_empty()
        || raw_price.is_empty()
        || raw_type.is_empty()
    {
        return Err(AppError::bad_request(
            "Flat number, wing, user name, mobile number, price and type are required fields",
        ));
    }
    let price: f64 = raw_price
        .parse()
        .map_err(|_| AppError::bad_request("Invalid price"))?;
    let listing_type: ListingType = raw_type
        .parse()
        .map_err(|()| AppError::bad_request("Type must be either Rent or Sale"))?;

    let property = Property::new(
        flat_no,
        wing,
        user_name,
        mobile_number,
        price,
        listing_type,
        eligibility,
        visit_time,
    );
    let property = state
        .properties
        .create(property, form.images, form.videos)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Property created successfully",
            "property": with_media_urls(&property)?,
        })),
    ))
}

pub async fn list_properties(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let properties = state.properties.list().await?;
    let properties = properties
        .iter()
        .map(with_media_urls)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(json!({ "success": true, "properties": properties })))
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let property = state.properties.get(id).await?;

    Ok(Json(
        json!({ "success": true, "property": with_media_urls(&property)? }),
    ))
}

/// Listings posted by one resident, newest first.
pub async fn list_properties_by_mobile(
    State(state): State<AppState>,
    Path(mobile_number): Path<String>,
) -> AppResult<Json<Value>> {
    let properties = state
        .properties
        .repository()
        .fetch_by_mobile(&mobile_number)
        .await?;
    let properties = properties
        .iter()
        .map(with_media_urls)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(json!({ "success": true, "properties": properties })))
}

pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<Value>> {
    let form = MediaForm::collect(multipart).await?;

    let mut patch = PropertyPatch {
        flat_no: form.text("flatNo").map(str::to_string),
        wing: form.text("wing").map(str::to_string),
        user_name: form.text("userName").map(str::to_string),
        mobile_number: form.text("mobileNumber").map(str::to_string),
        price: None,
        listing_type: None,
        eligibility: form.text("eligibility").map(str::to_string),
        visit_time: form.text("visitTime").map(str::to_string),
    };
    if let Some(raw_price) = form.text("price")
        && !raw_price.is_empty()
    {
        patch.price = Some(
            raw_price
                .parse()
                .map_err(|_| AppError::bad_request("Invalid price"))?,
        );
    }
    if let Some(raw_type) = form.text("type")
        && !raw_type.is_empty()
    {
        patch.listing_type = Some(
            raw_type
                .parse()
                .map_err(|()| AppError::bad_request("Type must be either Rent or Sale"))?,
        );
    }

    let retained_images = parse_retained_indices(form.values("existingImages"));
    let retained_videos = parse_retained_indices(form.values("existingVideos"));

    let property = state
        .properties
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
        "message": "Property updated successfully",
        "property": with_media_urls(&property)?,
    })))
}

pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    state.properties.delete(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Property deleted successfully",
    })))
}

pub async fn serve_property_media(
    State(state): State<AppState>,
    Path((id, kind, index)): Path<(Uuid, String, String)>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    let kind =
        MediaKind::from_segment(&kind).ok_or_else(|| AppError::bad_request("Invalid media type"))?;
    let index: usize = index
        .parse()
        .map_err(|_| AppError::not_found("Media not found"))?;

    let attachment = state.properties.resolve_media(id, kind, index).await?;
    Ok(serve_attachment(attachment))
}
