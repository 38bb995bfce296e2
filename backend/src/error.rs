//! Error handling for the AgroClima backend
//!
//! Provides consistent error responses in English and Spanish

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String, message_es: String },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Remote collaborator errors
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Upstream returned {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Unexpected upstream response: {0}")]
    UpstreamResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Classify a failed outbound request. Connection problems and timeouts
    /// mean the collaborator could not be reached at all.
    pub fn from_reqwest(service: &str, err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            AppError::UpstreamUnreachable(format!("{}: {}", service, err))
        } else if let Some(status) = err.status() {
            AppError::UpstreamStatus {
                status: status.as_u16(),
                message: format!("{}: {}", service, err),
            }
        } else if err.is_decode() {
            AppError::UpstreamResponse(format!("{}: {}", service, err))
        } else {
            AppError::UpstreamUnreachable(format!("{}: {}", service, err))
        }
    }

    /// Rejected field, from one of the shared validators
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
            message_es: format!("Valor no válido para {}", field),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let first = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                (field.to_string(), message)
            });

        match first {
            Some((field, message)) => AppError::Validation {
                message_es: format!("Valor no válido para {}", field),
                field,
                message,
            },
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    pub fn new(code: &str, message_en: impl Into<String>, message_es: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message_en: message_en.into(),
            message_es: message_es.into(),
            field: None,
        }
    }
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new(
                    "INVALID_CREDENTIALS",
                    "Invalid email or password",
                    "Correo o contraseña incorrectos",
                ),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("TOKEN_EXPIRED", "Token has expired", "La sesión ha expirado"),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("INVALID_TOKEN", "Invalid token", "Token no válido"),
            ),
            AppError::Unauthorized {
                message,
                message_es,
            } => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("UNAUTHORIZED", message.clone(), message_es.clone()),
            ),
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone(), message_es.clone())
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new(
                    "VALIDATION_ERROR",
                    msg.clone(),
                    format!("Datos no válidos: {}", msg),
                ),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new(
                    "NOT_FOUND",
                    format!("{} not found", resource),
                    format!("No se encontró {}", resource),
                ),
            ),
            AppError::UpstreamUnreachable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new(
                    "UPSTREAM_UNREACHABLE",
                    "Could not connect to the server. Check that the backend is running.",
                    "No se pudo conectar con el servidor. Verifica que el backend esté corriendo.",
                ),
            ),
            AppError::UpstreamStatus { status, message } => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new(
                    "UPSTREAM_ERROR",
                    format!("Server error ({}): {}", status, message),
                    format!("Error del servidor ({}): {}", status, message),
                ),
            ),
            AppError::UpstreamResponse(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail::new(
                    "UPSTREAM_RESPONSE_ERROR",
                    format!("Unexpected response from server: {}", msg),
                    format!("Respuesta inesperada del servidor: {}", msg),
                ),
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "CONFIGURATION_ERROR",
                    format!("Configuration error: {}", msg),
                    format!("Error de configuración: {}", msg),
                ),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", msg.clone(), "Error interno del servidor"),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "INTERNAL_ERROR",
                    "An internal server error occurred",
                    "Error interno del servidor",
                ),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
