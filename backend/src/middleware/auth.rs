//! Authentication middleware
//!
//! Validates the session token and makes the signed-in user available to
//! handlers

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, ErrorDetail, ErrorResponse};
use crate::services::auth::decode_token;
use crate::AppState;

/// Authenticated user information extracted from the session token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token,
        None => {
            return AppError::Unauthorized {
                message: "Missing or invalid Authorization header".to_string(),
                message_es: "Falta el encabezado de autorización o no es válido".to_string(),
            }
            .into_response();
        }
    };

    let auth_user = match decode_token(token, &state.config.jwt.secret).and_then(|claims| {
        Ok(AuthUser {
            user_id: claims.user_id()?,
            name: claims.name,
            email: claims.email,
        })
    }) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extractor for authenticated user
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: ErrorDetail::new(
                        "UNAUTHORIZED",
                        "Authentication required",
                        "Debe iniciar sesión",
                    ),
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}
