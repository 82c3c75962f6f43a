//! Complaint endpoints. Bodies are JSON; successful responses carry the
//! bare resource, which is how the complaint surface is documented.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use veranda_model::{Complaint, ComplaintPatch, ComplaintStatus, EvidenceImage, NewComplaint};

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplaintUpdateRequest {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub admin_response: Option<String>,
    pub evidence_image: Option<EvidenceImage>,
}

pub async fn create_complaint(
    State(state): State<AppState>,
    Json(new): Json<NewComplaint>,
) -> AppResult<(StatusCode, Json<Complaint>)> {
    if new.username.is_empty()
        || new.flat_no.is_empty()
        || new.wing.is_empty()
        || new.subject.is_empty()
        || new.description.is_empty()
    {
        return Err(AppError::bad_request(
            "Username, flat number, wing, subject and description are required fields",
        ));
    }

    let complaint = Complaint::submit(new);
    state.complaints.insert(&complaint).await?;

    Ok((StatusCode::CREATED, Json(complaint)))
}

pub async fn list_complaints(State(state): State<AppState>) -> AppResult<Json<Vec<Complaint>>> {
    Ok(Json(state.complaints.fetch_all().await?))
}

pub async fn get_complaint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Complaint>> {
    let complaint = state
        .complaints
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::not_found("Complaint not found"))?;

    Ok(Json(complaint))
}

pub async fn update_complaint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ComplaintUpdateRequest>,
) -> AppResult<Json<Complaint>> {
    let status = request
        .status
        .map(|raw| {
            raw.parse::<ComplaintStatus>()
                .map_err(|()| AppError::bad_request("Invalid status value"))
        })
        .transpose()?;

    let mut complaint = state
        .complaints
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::not_found("Complaint not found"))?;

    complaint.apply(ComplaintPatch {
        subject: request.subject,
        description: request.description,
        status,
        admin_response: request.admin_response,
        evidence_image: request.evidence_image,
    });
    state.complaints.replace(&complaint).await?;

    Ok(Json(complaint))
}

pub async fn delete_complaint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    if !state.complaints.remove(id).await? {
        return Err(AppError::not_found("Complaint not found"));
    }

    Ok(Json(json!({ "message": "Complaint deleted successfully" })))
}
