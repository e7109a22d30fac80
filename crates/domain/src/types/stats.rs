//! Dashboard statistics

use serde::{Deserialize, Serialize};

/// Aggregates shown on the statistics screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_listings: u64,
    pub active_listings: u64,
    pub sold_listings: u64,
    pub total_sellers: u64,
    pub total_users: u64,
    pub pending_quotes: u64,
    pub active_reservations: u64,
    pub open_conversations: u64,
    pub revenue: f64,
    pub monthly: Vec<MonthlyVolume>,
}

/// One point of the monthly volume series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyVolume {
    /// `YYYY-MM`
    pub month: String,
    pub listings: u64,
    pub sales: u64,
    pub revenue: f64,
}

impl Statistics {
    /// Share of listings that ended in a sale, `0.0` when nothing is listed
    #[must_use]
    pub fn conversion_rate(&self) -> f64 {
        if self.total_listings == 0 {
            return 0.0;
        }
        self.sold_listings as f64 / self.total_listings as f64
    }
}
