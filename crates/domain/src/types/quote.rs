//! Quotes and reservations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;

/// Lifecycle of a quote; `Reserved` holds the vehicle for the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Reserved,
    Confirmed,
    Cancelled,
}

crate::impl_domain_status_conversions!(QuoteStatus {
    Pending => "pending",
    Reserved => "reserved",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
});

impl QuoteStatus {
    /// No further transition is possible
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

/// Price offer for importing one listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub listing_id: String,
    pub customer_id: String,
    pub status: QuoteStatus,
    pub vehicle_price: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub customs_cost: f64,
    #[serde(default)]
    pub service_fee: f64,
    pub currency: String,
    #[serde(default)]
    pub reserved_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quote {
    /// Landed cost shown to the customer
    #[must_use]
    pub fn total(&self) -> f64 {
        self.vehicle_price + self.shipping_cost + self.customs_cost + self.service_fee
    }
}

/// Create/update payload for [`Quote`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PATCH /quotes/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteStatusUpdate {
    pub status: QuoteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_until: Option<DateTime<Utc>>,
}

impl Resource for Quote {
    const PATH: &'static str = "/quotes";
    type Input = QuoteInput;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_every_cost() {
        let quote = Quote {
            id: "q1".to_string(),
            listing_id: "l1".to_string(),
            customer_id: "c1".to_string(),
            status: QuoteStatus::Pending,
            vehicle_price: 20_000.0,
            shipping_cost: 1_500.0,
            customs_cost: 2_000.0,
            service_fee: 500.0,
            currency: "EUR".to_string(),
            reserved_until: None,
            notes: None,
            created_at: None,
        };

        assert!((quote.total() - 24_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn terminal_states() {
        assert!(QuoteStatus::Confirmed.is_terminal());
        assert!(QuoteStatus::Cancelled.is_terminal());
        assert!(!QuoteStatus::Reserved.is_terminal());
    }
}
