//! Private page, curated video and document models.

use medoh_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A row from the `private_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrivatePage {
    pub id: DbId,
    pub doctor_id: DbId,
    pub patient_name: String,
    pub patient_phone: String,
    pub patient_email: String,
    /// Opaque token used in the patient-facing link.
    pub url_token: Uuid,
    pub created_at: Timestamp,
}

/// A row from the `private_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrivateDocument {
    pub id: DbId,
    pub private_page_id: DbId,
    pub file_url: String,
    pub file_name: Option<String>,
    pub file_type: String,
    pub document_type: Option<String>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// An already-uploaded document to attach to a page.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPrivateDocument {
    #[validate(url)]
    pub file_url: String,
    pub file_name: Option<String>,
    /// Derived from the URL extension when omitted.
    pub file_type: Option<String>,
    pub document_type: Option<String>,
}

/// DTO for creating a private page with its curated videos and documents.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrivatePage {
    pub doctor_id: DbId,
    pub patient_name: String,
    pub patient_phone: String,
    #[serde(default)]
    pub video_ids: Vec<DbId>,
    #[serde(default)]
    #[validate(nested)]
    pub documents: Vec<NewPrivateDocument>,
}

/// DTO for replacing a page's curated video set.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplacePrivateVideos {
    pub video_ids: Vec<DbId>,
}
