//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{RegisterInput, Session};
use crate::services::AuthService;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<Session>> {
    body.validate()?;

    let auth_service = AuthService::new(state.farm_api.clone(), &state.config);
    let session = auth_service.login(body.email.trim(), &body.password).await?;
    Ok(Json(session))
}

/// Register account endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    body.validate()?;

    let input = RegisterInput {
        name: body.name,
        email: body.email,
        password: body.password,
        location: body.location,
    };

    let auth_service = AuthService::new(state.farm_api.clone(), &state.config);
    let created = auth_service.register(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Current session's user
pub async fn me(current_user: CurrentUser) -> Json<MeResponse> {
    let user = current_user.0;
    Json(MeResponse {
        user_id: user.user_id,
        name: user.name,
        email: user.email,
    })
}
