//! Dashboard handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{DashboardAggregator, DashboardSummary, Language};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::DashboardService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<Language>,
}

/// Summary statistics over all active crops
pub async fn get_dashboard(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<LanguageQuery>,
) -> AppResult<Json<DashboardSummary>> {
    let language = query.lang.unwrap_or(state.config.dashboard.language);
    let aggregator = DashboardAggregator::new(state.config.estimator(), language);

    let service = DashboardService::new(state.farm_api, aggregator);
    let today = chrono::Local::now().date_naive();
    let summary = service.summary(today).await?;
    Ok(Json(summary))
}
