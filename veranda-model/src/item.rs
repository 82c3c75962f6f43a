//! Visitor and resident directory records.
//!
//! A deliberately wide, mostly-optional document: the same form backs
//! visitor passes and resident registrations, so only `name` is required.

use crate::{overwrite_if_present, overwrite_optional};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
}

/// Document metadata attached to a record (id proofs and the like). The
/// payload is whatever the client submitted, usually a data URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub flat_no: Option<String>,
    pub wing_number: Option<String>,
    pub role: Option<String>,
    pub occupation: Option<String>,
    pub adhar_card: Option<String>,
    pub password: Option<String>,
    pub location: Option<String>,
    pub visit_time: Option<String>,
    pub relation: Option<String>,
    pub purpose: Option<String>,
    pub family_members: Vec<FamilyMember>,
    pub documents: Vec<ItemDocument>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn register(new: NewItem) -> Self {
        Item {
            id: Uuid::new_v4(),
            name: new.name,
            full_name: new.full_name,
            mobile_number: new.mobile_number,
            email: new.email,
            flat_no: new.flat_no,
            wing_number: new.wing_number,
            role: new.role,
            occupation: new.occupation,
            adhar_card: new.adhar_card,
            password: new.password,
            location: new.location,
            visit_time: new.visit_time,
            relation: new.relation,
            purpose: new.purpose,
            family_members: new.family_members,
            documents: new.documents,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, patch: ItemPatch) {
        overwrite_if_present(&mut self.name, patch.name);
        overwrite_optional(&mut self.full_name, patch.full_name);
        overwrite_optional(&mut self.mobile_number, patch.mobile_number);
        overwrite_optional(&mut self.email, patch.email);
        overwrite_optional(&mut self.flat_no, patch.flat_no);
        overwrite_optional(&mut self.wing_number, patch.wing_number);
        overwrite_optional(&mut self.role, patch.role);
        overwrite_optional(&mut self.occupation, patch.occupation);
        overwrite_optional(&mut self.adhar_card, patch.adhar_card);
        overwrite_optional(&mut self.password, patch.password);
        overwrite_optional(&mut self.location, patch.location);
        overwrite_optional(&mut self.visit_time, patch.visit_time);
        overwrite_optional(&mut self.relation, patch.relation);
        overwrite_optional(&mut self.purpose, patch.purpose);
        if let Some(members) = patch.family_members {
            self.family_members = members;
        }
        if let Some(documents) = patch.documents {
            self.documents = documents;
        }
    }
}

/// Body of `POST /api/items`. Everything defaults so malformed optional
/// fields never reject the request; `name` presence is checked by the
/// handler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub flat_no: Option<String>,
    #[serde(default)]
    pub wing_number: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub adhar_card: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub visit_time: Option<String>,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
    #[serde(default)]
    pub documents: Vec<ItemDocument>,
}

/// Parsed body of `PUT /api/items/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub flat_no: Option<String>,
    #[serde(default)]
    pub wing_number: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub adhar_card: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub visit_time: Option<String>,
    #[serde(default)]
    pub relation: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub family_members: Option<Vec<FamilyMember>>,
    #[serde(default)]
    pub documents: Option<Vec<ItemDocument>>,
}
