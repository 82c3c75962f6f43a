//! Notice board endpoints: targeted announcements with deadline expiry.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use veranda_model::{NewNotice, Notice, NoticeFilter, NoticePatch, NoticeStatus};

use crate::errors::{AppError, AppResult};
use crate::handlers::parse_datetime;
use crate::infra::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeUpdateRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub posted_by: Option<String>,
    pub deadline: Option<String>,
    pub audience_type: Option<String>,
    pub target_area: Option<String>,
    #[serde(deserialize_with = "lenient_optional_list")]
    pub target_users: Option<Vec<String>>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// `targetUsers` arrives as a list, a bare string, or `""` for none.
fn lenient_optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        List(Vec<String>),
        One(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        None => None,
        Some(Repr::List(users)) => Some(users),
        Some(Repr::One(user)) if user.is_empty() => Some(Vec::new()),
        Some(Repr::One(user)) => Some(vec![user]),
    })
}

pub async fn create_notice(
    State(state): State<AppState>,
    Json(new): Json<NewNotice>,
) -> AppResult<(StatusCode, Json<Notice>)> {
    if new.title.is_empty() || new.message.is_empty() || new.posted_by.is_empty() {
        return Err(AppError::bad_request(
            "Title, message and postedBy are required fields",
        ));
    }

    let notice = Notice::post(new, Utc::now());
    state.notices.insert(&notice).await?;

    Ok((StatusCode::CREATED, Json(notice)))
}

pub async fn list_notices(
    State(state): State<AppState>,
    Query(filter): Query<NoticeFilter>,
) -> AppResult<Json<Vec<Notice>>> {
    let now = Utc::now();
    let mut notices = state.notices.fetch_filtered(&filter).await?;
    for notice in &mut notices {
        notice.refresh_status(now);
    }

    Ok(Json(notices))
}

pub async fn get_notice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Notice>> {
    let mut notice = state
        .notices
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::not_found("Notice not found"))?;
    notice.refresh_status(Utc::now());

    Ok(Json(notice))
}

pub async fn update_notice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NoticeUpdateRequest>,
) -> AppResult<Json<Value>> {
    let deadline = match request.deadline.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            parse_datetime(raw).ok_or_else(|| AppError::bad_request("Invalid deadline format"))?,
        ),
    };
    let status = request
        .status
        .map(|raw| {
            raw.parse::<NoticeStatus>()
                .map_err(|()| AppError::bad_request("Invalid status value"))
        })
        .transpose()?;

    let mut notice = state
        .notices
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::not_found("Notice not found"))?;

    notice.apply(
        NoticePatch {
            title: request.title,
            message: request.message,
            posted_by: request.posted_by,
            deadline,
            audience_type: request.audience_type,
            target_area: request.target_area,
            target_users: request.target_users,
            category: request.category,
            priority: request.priority,
            status,
        },
        Utc::now(),
    );
    state.notices.replace(&notice).await?;

    Ok(Json(json!({
        "message": "Notice updated successfully",
        "notice": notice,
    })))
}

pub async fn delete_notice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    if !state.notices.remove(id).await? {
        return Err(AppError::not_found("Notice not found"));
    }

    Ok(Json(json!({ "message": "Notice deleted successfully" })))
}
