//! Prediction service: plant identification and pest risk

use serde_json::Value;
use shared::{validate_pest_risk_input, PestRiskAssessment, PestRiskInput};

use crate::error::{AppError, AppResult};
use crate::external::PredictionClient;

/// Largest image forwarded to the plant model
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct PredictionService {
    client: PredictionClient,
}

/// An uploaded image
#[derive(Debug)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PredictionService {
    pub fn new(client: PredictionClient) -> Self {
        Self { client }
    }

    /// Identify a plant from a photo
    pub async fn predict_plant(&self, upload: ImageUpload) -> AppResult<Value> {
        Self::check_image(&upload)?;

        tracing::debug!(
            "Forwarding {} ({} bytes) for plant prediction",
            upload.filename,
            upload.bytes.len()
        );
        self.client
            .predict_plant(upload.filename, upload.bytes, upload.content_type.as_deref())
            .await
    }

    /// Pest outbreak risk for the given field readings
    pub async fn predict_pest_risk(&self, input: PestRiskInput) -> AppResult<PestRiskAssessment> {
        validate_pest_risk_input(&input).map_err(|m| AppError::invalid_field("readings", m))?;
        self.client.predict_pest_risk(&input).await
    }

    fn check_image(upload: &ImageUpload) -> AppResult<()> {
        if upload.bytes.is_empty() {
            return Err(AppError::Validation {
                field: "file".to_string(),
                message: "Image file is empty".to_string(),
                message_es: "El archivo de imagen está vacío".to_string(),
            });
        }
        if upload.bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::Validation {
                field: "file".to_string(),
                message: "Image file is too large".to_string(),
                message_es: "El archivo de imagen es demasiado grande".to_string(),
            });
        }
        match upload.content_type.as_deref() {
            Some(mime) if !mime.starts_with("image/") => Err(AppError::Validation {
                field: "file".to_string(),
                message: "File must be an image".to_string(),
                message_es: "El archivo debe ser una imagen".to_string(),
            }),
            _ => Ok(()),
        }
    }
}
