//! Prediction service client
//!
//! Forwards plant images and field readings to the plant-identification and
//! pest-risk models.

use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{PestRisk, PestRiskAssessment, PestRiskInput};

use crate::error::{AppError, AppResult};

const SERVICE: &str = "prediction service";

/// Prediction service client
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

/// Pest-risk request as the model expects it
#[derive(Debug, Serialize)]
struct PestRiskRequest {
    temperatura: f64,
    humedad: f64,
    dias_sin_lluvia: u32,
}

impl From<&PestRiskInput> for PestRiskRequest {
    fn from(input: &PestRiskInput) -> Self {
        Self {
            temperatura: input.temperature,
            humedad: input.humidity,
            dias_sin_lluvia: input.days_without_rain,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PestRiskResponse {
    riesgo: String,
}

impl PredictionClient {
    /// Create a new PredictionClient
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, request: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::from_reqwest(SERVICE, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response)
    }

    /// Identify a plant from an image. The model's answer is returned as is.
    pub async fn predict_plant(
        &self,
        filename: String,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> AppResult<Value> {
        let mut part = multipart::Part::bytes(bytes).file_name(filename);
        if let Some(mime) = content_type {
            part = part
                .mime_str(mime)
                .map_err(|e| AppError::ValidationError(format!("Invalid content type: {}", e)))?;
        }
        let form = multipart::Form::new().part("file", part);

        let url = self.url("predict-plant");
        tracing::debug!("Sending plant image to {}", url);

        self.post(self.client.post(&url).multipart(form))
            .await?
            .json()
            .await
            .map_err(|e| AppError::UpstreamResponse(format!("{}: {}", SERVICE, e)))
    }

    /// Estimate pest outbreak risk from field readings
    pub async fn predict_pest_risk(&self, input: &PestRiskInput) -> AppResult<PestRiskAssessment> {
        let url = self.url("prediccion-plagas");
        tracing::debug!("Requesting pest risk from {}", url);

        let response: PestRiskResponse = self
            .post(self.client.post(&url).json(&PestRiskRequest::from(input)))
            .await?
            .json()
            .await
            .map_err(|e| AppError::UpstreamResponse(format!("{}: {}", SERVICE, e)))?;

        let risk = Self::parse_risk(&response.riesgo)?;
        Ok(PestRiskAssessment { risk })
    }

    /// Convert the model's risk label to PestRisk
    pub fn parse_risk(label: &str) -> AppResult<PestRisk> {
        PestRisk::from_label(label).ok_or_else(|| {
            AppError::UpstreamResponse(format!("{}: unknown risk level '{}'", SERVICE, label))
        })
    }
}
