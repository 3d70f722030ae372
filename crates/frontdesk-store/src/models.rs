//! Domain model structs held in the in-memory store.
//!
//! Every persisted struct derives `Serialize` and `Deserialize` so it can be
//! handed directly to the HTTP layer as JSON.  Field names are camelCase on
//! the wire to match what the dashboard UI expects.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A staff account.  Username uniqueness is a caller-side lookup concern
/// (check `user_by_username` before inserting); the store never enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Opaque credential, stored exactly as given.
    pub password: String,
}

/// Caller-suppliable fields for creating a [`User`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Concern
// ---------------------------------------------------------------------------

/// Triage status of a [`Concern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConcernStatus {
    #[default]
    Pending,
    Urgent,
    Overdue,
    Tasked,
    Done,
}

impl ConcernStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernStatus::Pending => "pending",
            ConcernStatus::Urgent => "urgent",
            ConcernStatus::Overdue => "overdue",
            ConcernStatus::Tasked => "tasked",
            ConcernStatus::Done => "done",
        }
    }
}

impl fmt::Display for ConcernStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcernStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ConcernStatus::Pending),
            "urgent" => Ok(ConcernStatus::Urgent),
            "overdue" => Ok(ConcernStatus::Overdue),
            "tasked" => Ok(ConcernStatus::Tasked),
            "done" => Ok(ConcernStatus::Done),
            _ => Err(()),
        }
    }
}

/// A patient issue ticket, the root aggregate of the data model.
///
/// Only `status` (and with it `updated_at`) is mutable after creation;
/// concerns are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Concern {
    pub id: Uuid,
    pub patient_name: String,
    /// Free-form date-of-birth string, never parsed as a date.
    pub patient_dob: String,
    /// Free-form category.  The UI presents a fixed set but the store
    /// accepts any string.
    pub category: String,
    pub title: String,
    pub status: ConcernStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-suppliable fields for creating a [`Concern`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConcern {
    pub patient_name: String,
    pub patient_dob: String,
    pub category: String,
    pub title: String,
    /// Defaults to [`ConcernStatus::Pending`] when omitted.
    #[serde(default)]
    pub status: Option<ConcernStatus>,
}

// ---------------------------------------------------------------------------
// CallDoc
// ---------------------------------------------------------------------------

/// Documentation of a phone interaction tied to one concern.  Immutable
/// after creation.
///
/// `concern_id` is not validated against existing concerns; out-of-order
/// creation is tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CallDoc {
    pub id: Uuid,
    pub concern_id: Uuid,
    pub agent_name: String,
    pub call_notes: String,
    pub resolution: Option<String>,
    pub agent_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-suppliable fields for creating a [`CallDoc`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCallDoc {
    pub concern_id: Uuid,
    pub agent_name: String,
    pub call_notes: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub agent_message: Option<String>,
}

// ---------------------------------------------------------------------------
// ChatMessage
// ---------------------------------------------------------------------------

/// An internal staff discussion entry tied to one concern.  Immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub concern_id: Uuid,
    pub sender: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-suppliable fields for creating a [`ChatMessage`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub concern_id: Uuid,
    pub sender: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// Metadata for an uploaded image, optionally tied to a concern and/or a
/// call doc.  The bytes themselves live in the content store under the
/// generated `path`, never under the original `filename`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: Uuid,
    pub concern_id: Option<Uuid>,
    pub call_doc_id: Option<Uuid>,
    /// Original name as supplied by the uploader, kept for display only.
    pub filename: String,
    pub mimetype: String,
    /// Size in bytes, measured from the actual upload.
    pub size: u64,
    /// Generated storage name inside the content store.
    pub path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Fields for registering an [`Image`].
///
/// Deliberately not `Deserialize`: image metadata is only ever produced by
/// the ingestion pipeline from a validated upload, never posted directly.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub concern_id: Option<Uuid>,
    pub call_doc_id: Option<Uuid>,
    pub filename: String,
    pub mimetype: String,
    pub size: u64,
    pub path: String,
}
