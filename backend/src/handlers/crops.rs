//! HTTP handlers for crop management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shared::CropRecord;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::CropService;
use crate::AppState;

/// List the user's active crops
pub async fn list_crops(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<CropRecord>>> {
    let service = CropService::new(state.farm_api);
    let crops = service.list_crops(current_user.0.user_id).await?;
    Ok(Json(crops))
}

/// Get a crop by ID
pub async fn get_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(crop_id): Path<i64>,
) -> AppResult<Json<CropRecord>> {
    let service = CropService::new(state.farm_api);
    let crop = service.get_crop(current_user.0.user_id, crop_id).await?;
    Ok(Json(crop))
}

/// Create a new crop
pub async fn create_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(crop): Json<CropRecord>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let service = CropService::new(state.farm_api);
    let created = service.create_crop(current_user.0.user_id, crop).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a crop
pub async fn update_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(crop): Json<CropRecord>,
) -> AppResult<Json<Value>> {
    let service = CropService::new(state.farm_api);
    let updated = service.update_crop(current_user.0.user_id, crop).await?;
    Ok(Json(updated))
}

/// Delete a crop
pub async fn delete_crop(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(crop_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let service = CropService::new(state.farm_api);
    let deleted = service.delete_crop(current_user.0.user_id, crop_id).await?;
    Ok(Json(deleted))
}

/// Irrigation records of a crop
pub async fn list_irrigations(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(crop_id): Path<i64>,
) -> AppResult<Json<Vec<Value>>> {
    let service = CropService::new(state.farm_api);
    let records = service
        .list_irrigations(current_user.0.user_id, crop_id)
        .await?;
    Ok(Json(records))
}
