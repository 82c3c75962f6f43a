//! # Veranda Model
//!
//! Shared data models for the Veranda society backend.
//!
//! ## Overview
//!
//! `veranda-model` defines the wire and domain types used across the
//! workspace:
//!
//! - **Attachments**: embedded binary media (images/videos) with their
//!   declared content types, including the dual-encoded stored form and its
//!   normalization into canonical bytes
//! - **Media-backed resources**: events and property listings, which own
//!   ordered attachment sequences addressed by position
//! - **Plain resources**: payments, complaints, notices, and
//!   visitor/resident items
//! - **Request payloads**: create bodies and partial-update patches with
//!   the backend's overwrite-only-when-present semantics
//!
//! Types serialize with camelCase field names; that rendering is the wire
//! contract.

pub mod attachment;
pub mod complaint;
pub mod event;
pub mod item;
pub mod notice;
pub mod payment;
pub mod property;

pub use attachment::{
    Attachment, AttachmentDecodeError, MediaKind, MediaUrls, StoredAttachment,
    StoredBytes, UploadedFile,
};
pub use complaint::{Complaint, ComplaintPatch, ComplaintStatus, EvidenceImage, NewComplaint};
pub use event::{Event, EventPatch};
pub use item::{FamilyMember, Item, ItemDocument, ItemPatch, NewItem};
pub use notice::{NewNotice, Notice, NoticeFilter, NoticePatch, NoticeStatus};
pub use payment::{NewPayment, Payment};
pub use property::{ListingType, Property, PropertyPatch};

/// Overwrite `target` only when the patch carries a non-empty value.
///
/// Mirrors the backend's `field || stored` update rule: omitted and empty
/// values leave the stored value untouched.
pub(crate) fn overwrite_if_present(target: &mut String, value: Option<String>) {
    if let Some(value) = value
        && !value.is_empty()
    {
        *target = value;
    }
}

/// Same rule for optional stored fields: a non-empty value replaces the
/// stored one, everything else leaves it alone (never nulled by omission).
pub(crate) fn overwrite_optional(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value
        && !value.is_empty()
    {
        *target = Some(value);
    }
}
