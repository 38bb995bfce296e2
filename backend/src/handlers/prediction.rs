//! HTTP handlers for plant and pest predictions

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::Value;
use shared::{PestRiskAssessment, PestRiskInput};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::prediction::ImageUpload;
use crate::services::PredictionService;
use crate::AppState;

/// Identify a plant from an uploaded image (multipart field `file`)
pub async fn predict_plant(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("image.jpg").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::ValidationError(format!("Failed to read file: {}", e)))?;

        upload = Some(ImageUpload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::Validation {
        field: "file".to_string(),
        message: "An image file is required".to_string(),
        message_es: "Se requiere un archivo de imagen".to_string(),
    })?;

    let service = PredictionService::new(state.prediction);
    let prediction = service.predict_plant(upload).await?;
    Ok(Json(prediction))
}

/// Pest outbreak risk from field readings
pub async fn predict_pest_risk(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Json(input): Json<PestRiskInput>,
) -> AppResult<Json<PestRiskAssessment>> {
    let service = PredictionService::new(state.prediction);
    let assessment = service.predict_pest_risk(input).await?;
    Ok(Json(assessment))
}
