//! Client for the remote farm REST API
//!
//! The API owns users, crops and irrigation records. List endpoints scoped to
//! a user or crop wrap their payload in a `{mensaje, codigo, data}` envelope;
//! the active-crop endpoints return bare arrays.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use shared::{CropRecord, UserProfile};

use crate::error::{AppError, AppResult};

const SERVICE: &str = "farm API";

/// Farm API client
#[derive(Clone)]
pub struct FarmApiClient {
    client: Client,
    base_url: String,
}

/// Response envelope used by the scoped list endpoints
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    mensaje: Option<String>,
    #[serde(default)]
    codigo: Option<String>,
    data: Option<T>,
}

impl<T: Default> Envelope<T> {
    /// The payload when the API reports success, otherwise the empty value
    fn into_data(self) -> T {
        match (self.codigo.as_deref(), self.data) {
            (Some("OK"), Some(data)) => data,
            _ => {
                tracing::debug!(
                    "Farm API returned no data (codigo={:?}, mensaje={:?})",
                    self.codigo,
                    self.mensaje
                );
                T::default()
            }
        }
    }
}

/// Credentials as the farm API expects them
#[derive(Debug, Serialize)]
pub struct LoginPayload<'a> {
    pub correo: &'a str,
    pub contrasena: &'a str,
}

/// Login result from the farm API
#[derive(Debug, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// New account as the farm API expects it
#[derive(Debug, Serialize)]
pub struct RegisterPayload<'a> {
    pub nombre: &'a str,
    pub correo: &'a str,
    pub contrasena: &'a str,
    pub ubicacion: &'a str,
    #[serde(rename = "EstLogico")]
    pub est_logico: u8,
}

impl FarmApiClient {
    /// Create a new FarmApiClient
    pub fn new(base_url: impl Into<String>, timeout: std::time::Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client around an existing reqwest client (for testing)
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("Farm API {} {}", method, url);
        self.client.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::from_reqwest(SERVICE, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| AppError::UpstreamResponse(format!("{}: {}", SERVICE, e)))
    }

    /// Check credentials against the farm API
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginReply> {
        let payload = LoginPayload {
            correo: email,
            contrasena: password,
        };
        let result = self
            .json::<LoginReply>(self.request(Method::POST, "login").json(&payload))
            .await;

        match result {
            Err(AppError::UpstreamStatus { status, .. }) if status == 400 || status == 401 => {
                Err(AppError::InvalidCredentials)
            }
            other => other,
        }
    }

    /// Create a user account
    pub async fn register(&self, payload: &RegisterPayload<'_>) -> AppResult<Value> {
        self.json(self.request(Method::POST, "usuarios").json(payload))
            .await
    }

    /// All active crops across users
    pub async fn active_crops(&self) -> AppResult<Vec<CropRecord>> {
        self.json(self.request(Method::GET, "cultivos/activos/"))
            .await
    }

    /// Active crops owned by one user
    pub async fn crops_for_user(&self, user_id: i64) -> AppResult<Vec<CropRecord>> {
        let envelope: Envelope<Vec<CropRecord>> = self
            .json(self.request(Method::GET, &format!("cultivos/usuario/{}", user_id)))
            .await?;
        Ok(envelope.into_data())
    }

    /// One active crop by id. The API answers with a list of at most one.
    pub async fn crop_by_id(&self, crop_id: i64) -> AppResult<Option<CropRecord>> {
        let crops: Vec<CropRecord> = self
            .json(self.request(Method::GET, &format!("cultivos/activos/{}", crop_id)))
            .await?;
        Ok(crops.into_iter().next())
    }

    pub async fn create_crop(&self, crop: &CropRecord) -> AppResult<Value> {
        self.json(self.request(Method::POST, "cultivos/").json(crop))
            .await
    }

    pub async fn update_crop(&self, crop: &CropRecord) -> AppResult<Value> {
        self.json(self.request(Method::PUT, "cultivos/").json(crop))
            .await
    }

    /// Soft delete: the API clears the crop's `EstLogico` flag
    pub async fn delete_crop(&self, crop_id: i64) -> AppResult<Value> {
        self.json(self.request(Method::DELETE, &format!("cultivos/{}", crop_id)))
            .await
    }

    /// Irrigation records of one crop, passed through as the API returns them
    pub async fn irrigations_for_crop(&self, crop_id: i64) -> AppResult<Vec<Value>> {
        let envelope: Envelope<Vec<Value>> = self
            .json(self.request(Method::GET, &format!("riegos/cultivos/{}", crop_id)))
            .await?;
        Ok(envelope.into_data())
    }
}
