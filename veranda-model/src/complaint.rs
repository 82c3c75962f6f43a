//! Resident complaints with a small status workflow.

use crate::overwrite_if_present;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Workflow state of a complaint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    Inprogress,
    Solved,
}

impl FromStr for ComplaintStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ComplaintStatus::Pending),
            "inprogress" => Ok(ComplaintStatus::Inprogress),
            "solved" => Ok(ComplaintStatus::Solved),
            _ => Err(()),
        }
    }
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Inprogress => "inprogress",
            ComplaintStatus::Solved => "solved",
        }
    }
}

/// Optional photo evidence, carried as a base64 payload exactly as the
/// client submitted it. Evidence never joins the positional media store;
/// it is returned inline with the complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceImage {
    pub data: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,
    pub username: String,
    pub flat_no: String,
    pub wing: String,
    pub subject: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub admin_response: String,
    pub submitted_date: DateTime<Utc>,
    pub evidence_image: Option<EvidenceImage>,
}

impl Complaint {
    pub fn submit(new: NewComplaint) -> Self {
        Complaint {
            id: Uuid::new_v4(),
            username: new.username,
            flat_no: new.flat_no,
            wing: new.wing,
            subject: new.subject,
            description: new.description,
            status: ComplaintStatus::Pending,
            admin_response: String::new(),
            submitted_date: Utc::now(),
            evidence_image: new.evidence_image,
        }
    }

    /// Apply a partial update. `admin_response` may be set to any value the
    /// admin provides, including empty; scalar resident fields follow the
    /// overwrite-only-when-present rule. Status strings are validated by
    /// the caller before they reach this point.
    pub fn apply(&mut self, patch: ComplaintPatch) {
        overwrite_if_present(&mut self.subject, patch.subject);
        overwrite_if_present(&mut self.description, patch.description);
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(response) = patch.admin_response {
            self.admin_response = response;
        }
        if let Some(evidence) = patch.evidence_image {
            self.evidence_image = Some(evidence);
        }
    }
}

/// Body of `POST /api/complaints`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub flat_no: String,
    #[serde(default)]
    pub wing: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence_image: Option<EvidenceImage>,
}

/// Parsed body of `PUT /api/complaints/{id}`.
#[derive(Debug, Clone, Default)]
pub struct ComplaintPatch {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub admin_response: Option<String>,
    pub evidence_image: Option<EvidenceImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_defaults_to_pending_with_empty_admin_response() {
        let complaint = Complaint::submit(NewComplaint {
            username: "priya".to_string(),
            flat_no: "A-101".to_string(),
            wing: "A".to_string(),
            subject: "Water leakage".to_string(),
            description: "Leak in the bathroom ceiling".to_string(),
            evidence_image: None,
        });
        assert_eq!(complaint.status, ComplaintStatus::Pending);
        assert_eq!(complaint.admin_response, "");
    }

    #[test]
    fn status_parses_workflow_values_only() {
        assert_eq!("inprogress".parse(), Ok(ComplaintStatus::Inprogress));
        assert!("resolved".parse::<ComplaintStatus>().is_err());
    }

    #[test]
    fn admin_response_may_be_cleared_explicitly() {
        let mut complaint = Complaint::submit(NewComplaint {
            username: "priya".to_string(),
            flat_no: "A-101".to_string(),
            wing: "A".to_string(),
            subject: "Water leakage".to_string(),
            description: "Leak in the bathroom ceiling".to_string(),
            evidence_image: None,
        });
        complaint.apply(ComplaintPatch {
            admin_response: Some("Plumber scheduled".to_string()),
            status: Some(ComplaintStatus::Inprogress),
            ..ComplaintPatch::default()
        });
        assert_eq!(complaint.admin_response, "Plumber scheduled");
        assert_eq!(complaint.status, ComplaintStatus::Inprogress);
    }
}
