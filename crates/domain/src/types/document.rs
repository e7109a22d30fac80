//! Documents attached to listings and quotes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a document proves or describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Registration,
    Invoice,
    Customs,
    Inspection,
    Photo,
    Other,
}

crate::impl_domain_status_conversions!(DocumentKind {
    Registration => "registration",
    Invoice => "invoice",
    Customs => "customs",
    Inspection => "inspection",
    Photo => "photo",
    Other => "other",
});

/// Uploaded file as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub file_name: String,
    pub kind: DocumentKind,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub listing_id: Option<String>,
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}
