//! Dashboard service

use chrono::NaiveDate;
use shared::{DashboardAggregator, DashboardSummary};

use crate::error::AppResult;
use crate::external::FarmApiClient;

#[derive(Clone)]
pub struct DashboardService {
    farm_api: FarmApiClient,
    aggregator: DashboardAggregator,
}

impl DashboardService {
    pub fn new(farm_api: FarmApiClient, aggregator: DashboardAggregator) -> Self {
        Self {
            farm_api,
            aggregator,
        }
    }

    /// Summary statistics over every active crop
    pub async fn summary(&self, today: NaiveDate) -> AppResult<DashboardSummary> {
        let mut crops = self.farm_api.active_crops().await?;
        crops.retain(|c| c.active);

        tracing::debug!("Summarizing {} active crops", crops.len());
        Ok(self.aggregator.summarize(&crops, today))
    }
}
