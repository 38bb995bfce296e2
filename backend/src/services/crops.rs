//! Crop service: the user's crops and their irrigation records, kept on the
//! farm API

use serde_json::Value;
use shared::{validate_crop, validate_crop_id, CropRecord};

use crate::error::{AppError, AppResult};
use crate::external::FarmApiClient;

/// Crop service
#[derive(Clone)]
pub struct CropService {
    farm_api: FarmApiClient,
}

impl CropService {
    pub fn new(farm_api: FarmApiClient) -> Self {
        Self { farm_api }
    }

    /// Active crops owned by a user
    pub async fn list_crops(&self, user_id: i64) -> AppResult<Vec<CropRecord>> {
        let crops = self.farm_api.crops_for_user(user_id).await?;
        Ok(crops.into_iter().filter(|c| c.active).collect())
    }

    /// One crop, if it exists and belongs to the user
    pub async fn get_crop(&self, user_id: i64, crop_id: i64) -> AppResult<CropRecord> {
        validate_crop_id(crop_id).map_err(|m| AppError::invalid_field("id", m))?;

        let crop = self
            .farm_api
            .crop_by_id(crop_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Crop {}", crop_id)))?;

        // Records without an owner predate per-user crops
        if crop.owner_id != 0 && crop.owner_id != user_id {
            return Err(AppError::NotFound(format!("Crop {}", crop_id)));
        }

        Ok(crop)
    }

    /// Register a new crop for the user
    pub async fn create_crop(&self, user_id: i64, crop: CropRecord) -> AppResult<Value> {
        let crop = CropRecord {
            owner_id: user_id,
            active: true,
            ..crop
        };
        validate_crop(&crop).map_err(|m| AppError::invalid_field("crop", m))?;

        tracing::debug!("Creating {} crop for user {}", crop.crop_type, user_id);
        self.farm_api.create_crop(&crop).await
    }

    /// Replace an existing crop's fields
    pub async fn update_crop(&self, user_id: i64, crop: CropRecord) -> AppResult<Value> {
        let existing = self.get_crop(user_id, crop.id).await?;
        let crop = CropRecord {
            owner_id: user_id,
            active: existing.active,
            ..crop
        };
        validate_crop(&crop).map_err(|m| AppError::invalid_field("crop", m))?;

        self.farm_api.update_crop(&crop).await
    }

    /// Soft-delete a crop
    pub async fn delete_crop(&self, user_id: i64, crop_id: i64) -> AppResult<Value> {
        self.get_crop(user_id, crop_id).await?;
        tracing::info!("Deleting crop {} for user {}", crop_id, user_id);
        self.farm_api.delete_crop(crop_id).await
    }

    /// Irrigation records of one of the user's crops
    pub async fn list_irrigations(&self, user_id: i64, crop_id: i64) -> AppResult<Vec<Value>> {
        self.get_crop(user_id, crop_id).await?;
        self.farm_api.irrigations_for_crop(crop_id).await
    }
}
