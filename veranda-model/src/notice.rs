//! Society notices with audience targeting and deadline-driven expiry.

use crate::overwrite_if_present;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    #[default]
    Active,
    Expired,
    Archived,
}

impl FromStr for NoticeStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(NoticeStatus::Active),
            "expired" => Ok(NoticeStatus::Expired),
            "archived" => Ok(NoticeStatus::Archived),
            _ => Err(()),
        }
    }
}

impl NoticeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeStatus::Active => "active",
            NoticeStatus::Expired => "expired",
            NoticeStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub posted_by: String,
    pub posted_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub audience_type: String,
    pub target_area: String,
    pub target_users: Vec<String>,
    pub category: String,
    pub priority: String,
    pub status: NoticeStatus,
}

impl Notice {
    pub fn post(new: NewNotice, now: DateTime<Utc>) -> Self {
        let mut notice = Notice {
            id: Uuid::new_v4(),
            title: new.title,
            message: new.message,
            posted_by: new.posted_by,
            posted_at: now,
            deadline: new.deadline,
            audience_type: new.audience_type,
            target_area: new.target_area,
            target_users: new.target_users,
            category: new.category,
            priority: new.priority,
            status: NoticeStatus::Active,
        };
        notice.refresh_status(now);
        notice
    }

    /// Deadline rule: a notice whose deadline has passed reads as expired.
    /// Applied on every write and on every read, so stale stored statuses
    /// never leak to clients.
    pub fn refresh_status(&mut self, now: DateTime<Utc>) {
        if let Some(deadline) = self.deadline
            && deadline < now
        {
            self.status = NoticeStatus::Expired;
        }
    }

    /// Apply a partial update. A provided deadline re-derives the status in
    /// both directions and wins over a provided status; without a deadline
    /// the provided status (if any) applies as-is.
    pub fn apply(&mut self, patch: NoticePatch, now: DateTime<Utc>) {
        overwrite_if_present(&mut self.title, patch.title);
        overwrite_if_present(&mut self.message, patch.message);
        overwrite_if_present(&mut self.posted_by, patch.posted_by);
        overwrite_if_present(&mut self.audience_type, patch.audience_type);
        overwrite_if_present(&mut self.target_area, patch.target_area);
        if let Some(users) = patch.target_users {
            self.target_users = users;
        }
        overwrite_if_present(&mut self.category, patch.category);
        overwrite_if_present(&mut self.priority, patch.priority);
        if let Some(deadline) = patch.deadline {
            self.deadline = Some(deadline);
            self.status = if deadline > now {
                NoticeStatus::Active
            } else {
                NoticeStatus::Expired
            };
        } else if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Body of `POST /api/notices`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotice {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub posted_by: String,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default = "default_audience_type")]
    pub audience_type: String,
    #[serde(default = "default_target_area")]
    pub target_area: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub target_users: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_audience_type() -> String {
    "global".to_string()
}

fn default_target_area() -> String {
    "homepage".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

/// Clients sometimes send `targetUsers` as `""` (meaning none) or as a bare
/// string (meaning one). Normalize all of those into a list.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        List(Vec<String>),
        One(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Repr::List(users)) => Ok(users),
        Some(Repr::One(user)) if user.is_empty() => Ok(Vec::new()),
        Some(Repr::One(user)) => Ok(vec![user]),
    }
}

/// Parsed body of `PUT /api/notices/{id}`.
#[derive(Debug, Clone, Default)]
pub struct NoticePatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub posted_by: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub audience_type: Option<String>,
    pub target_area: Option<String>,
    pub target_users: Option<Vec<String>>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<NoticeStatus>,
}

/// Equality filters for `GET /api/notices`. Unknown filter values simply
/// match nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeFilter {
    pub audience_type: Option<String>,
    pub target_area: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl NoticeFilter {
    pub fn matches(&self, notice: &Notice) -> bool {
        let eq = |filter: &Option<String>, value: &str| {
            filter.as_deref().is_none_or(|wanted| wanted == value)
        };
        eq(&self.audience_type, &notice.audience_type)
            && eq(&self.target_area, &notice.target_area)
            && eq(&self.category, &notice.category)
            && eq(&self.priority, &notice.priority)
            && eq(&self.status, notice.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn posted(deadline: Option<DateTime<Utc>>) -> Notice {
        Notice::post(
            NewNotice {
                title: "Water supply interruption".to_string(),
                message: "Tank cleaning on Saturday".to_string(),
                posted_by: "secretary".to_string(),
                deadline,
                audience_type: default_audience_type(),
                target_area: default_target_area(),
                target_users: Vec::new(),
                category: default_category(),
                priority: default_priority(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn past_deadline_reads_as_expired() {
        let mut notice = posted(Some(Utc::now() - Duration::hours(1)));
        assert_eq!(notice.status, NoticeStatus::Expired);

        notice.status = NoticeStatus::Active;
        notice.refresh_status(Utc::now());
        assert_eq!(notice.status, NoticeStatus::Expired);
    }

    #[test]
    fn future_or_absent_deadline_stays_active() {
        assert_eq!(
            posted(Some(Utc::now() + Duration::days(2))).status,
            NoticeStatus::Active
        );
        assert_eq!(posted(None).status, NoticeStatus::Active);
    }

    #[test]
    fn filters_are_equality_matches() {
        let notice = posted(None);
        let mut filter = NoticeFilter::default();
        assert!(filter.matches(&notice));

        filter.category = Some("general".to_string());
        filter.priority = Some("medium".to_string());
        assert!(filter.matches(&notice));

        filter.priority = Some("high".to_string());
        assert!(!filter.matches(&notice));
    }

    #[test]
    fn updated_deadline_rederives_status_in_both_directions() {
        let now = Utc::now();
        let mut notice = posted(Some(now - Duration::hours(1)));
        assert_eq!(notice.status, NoticeStatus::Expired);

        notice.apply(
            NoticePatch {
                deadline: Some(now + Duration::days(1)),
                status: Some(NoticeStatus::Archived),
                ..NoticePatch::default()
            },
            now,
        );
        assert_eq!(notice.status, NoticeStatus::Active);

        notice.apply(
            NoticePatch {
                status: Some(NoticeStatus::Archived),
                ..NoticePatch::default()
            },
            now,
        );
        assert_eq!(notice.status, NoticeStatus::Archived);
    }

    #[test]
    fn target_users_accepts_empty_string_and_bare_string() {
        let empty: NewNotice = serde_json::from_value(serde_json::json!({
            "title": "t", "message": "m", "postedBy": "p", "targetUsers": "",
        }))
        .unwrap();
        assert!(empty.target_users.is_empty());

        let single: NewNotice = serde_json::from_value(serde_json::json!({
            "title": "t", "message": "m", "postedBy": "p", "targetUsers": "A-101",
        }))
        .unwrap();
        assert_eq!(single.target_users, vec!["A-101".to_string()]);

        let list: NewNotice = serde_json::from_value(serde_json::json!({
            "title": "t", "message": "m", "postedBy": "p",
            "targetUsers": ["A-101", "B-202"],
        }))
        .unwrap();
        assert_eq!(list.target_users.len(), 2);
    }
}
