//! HTTP handlers for generated tasks

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::Task;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::tasks::TaskBoard;
use crate::services::TaskService;
use crate::AppState;

/// Query parameters for crop-type tasks
#[derive(Debug, Deserialize)]
pub struct CropTypeQuery {
    pub crop_type: String,
    pub crop_id: i64,
}

/// Task board for the user's active crops
pub async fn get_tasks(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<TaskBoard>> {
    let service = TaskService::new(state.farm_api);
    let today = chrono::Local::now().date_naive();
    let board = service.board_for_user(current_user.0.user_id, today).await?;
    Ok(Json(board))
}

/// Tasks specific to a crop type
pub async fn get_crop_type_tasks(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<CropTypeQuery>,
) -> AppResult<Json<Vec<Task>>> {
    let service = TaskService::new(state.farm_api);
    let today = chrono::Local::now().date_naive();
    let tasks = service.crop_type_tasks(&query.crop_type, query.crop_id, today)?;
    Ok(Json(tasks))
}
