//! Property listings offered for rent or sale by residents.

use crate::attachment::Attachment;
use crate::{overwrite_if_present, overwrite_optional};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Whether a listing offers the flat for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingType {
    Rent,
    Sale,
}

impl FromStr for ListingType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Rent" => Ok(ListingType::Rent),
            "Sale" => Ok(ListingType::Sale),
            _ => Err(()),
        }
    }
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Rent => "Rent",
            ListingType::Sale => "Sale",
        }
    }
}

/// A property listing. Media handling is identical to [`crate::Event`]:
/// attachments live on the row and are addressed by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub flat_no: String,
    pub wing: String,
    pub user_name: String,
    pub mobile_number: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub eligibility: Option<String>,
    pub visit_time: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub images: Vec<Attachment>,
    #[serde(skip)]
    pub videos: Vec<Attachment>,
}

impl Property {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        flat_no: String,
        wing: String,
        user_name: String,
        mobile_number: String,
        price: f64,
        listing_type: ListingType,
        eligibility: Option<String>,
        visit_time: Option<String>,
    ) -> Self {
        Property {
            id: Uuid::new_v4(),
            flat_no,
            wing,
            user_name,
            mobile_number,
            price,
            listing_type,
            eligibility,
            visit_time,
            created_at: Utc::now(),
            images: Vec::new(),
            videos: Vec::new(),
        }
    }

    /// Apply a partial update with the same overwrite-only-when-present
    /// rules as events. A zero price counts as absent.
    pub fn apply(&mut self, patch: PropertyPatch) {
        overwrite_if_present(&mut self.flat_no, patch.flat_no);
        overwrite_if_present(&mut self.wing, patch.wing);
        overwrite_if_present(&mut self.user_name, patch.user_name);
        overwrite_if_present(&mut self.mobile_number, patch.mobile_number);
        if let Some(price) = patch.price
            && price != 0.0
        {
            self.price = price;
        }
        if let Some(listing_type) = patch.listing_type {
            self.listing_type = listing_type;
        }
        overwrite_optional(&mut self.eligibility, patch.eligibility);
        overwrite_optional(&mut self.visit_time, patch.visit_time);
    }
}

/// Scalar fields of a listing update.
#[derive(Debug, Clone, Default)]
pub struct PropertyPatch {
    pub flat_no: Option<String>,
    pub wing: Option<String>,
    pub user_name: Option<String>,
    pub mobile_number: Option<String>,
    pub price: Option<f64>,
    pub listing_type: Option<ListingType>,
    pub eligibility: Option<String>,
    pub visit_time: Option<String>,
}
