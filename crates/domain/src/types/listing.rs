//! Vehicle listings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;

/// Publication state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Draft,
    Published,
    Reserved,
    Sold,
    Archived,
}

crate::impl_domain_status_conversions!(ListingStatus {
    Draft => "draft",
    Published => "published",
    Reserved => "reserved",
    Sold => "sold",
    Archived => "archived",
});

/// Vehicle offered for import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(default)]
    pub mileage_km: Option<u32>,
    pub price: f64,
    pub currency: String,
    pub status: ListingStatus,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Whether the vehicle can still be quoted or reserved
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == ListingStatus::Published
    }
}

/// Create/update payload for [`Listing`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage_km: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Listing {
    const PATH: &'static str = "/listings";
    type Input = ListingInput;
}
