//! Dashboard statistics

use std::sync::Arc;

use importdesk_domain::Statistics;

use super::client::ApiClient;
use super::errors::ApiError;

const STATISTICS_PATH: &str = "/statistics";

#[derive(Debug, Clone)]
pub struct StatisticsService {
    client: Arc<ApiClient>,
}

impl StatisticsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch(&self) -> Result<Statistics, ApiError> {
        self.client.get(STATISTICS_PATH).await
    }
}
