//! Authentication service: login and registration through the farm API, and
//! the session tokens issued on top of it

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::UserProfile;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::farm_api::RegisterPayload;
use crate::external::FarmApiClient;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    farm_api: FarmApiClient,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for registering a new account
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String, // Farm API user id
    pub name: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> AppResult<i64> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }
}

/// Session token handed to the client
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Result of a successful login
#[derive(Debug, Serialize)]
pub struct Session {
    #[serde(flatten)]
    pub tokens: AuthTokens,
    pub user: UserProfile,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(farm_api: FarmApiClient, config: &Config) -> Self {
        Self {
            farm_api,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Check credentials with the farm API and open a session
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let reply = self.farm_api.login(email, password).await?;

        let user = match (reply.success, reply.user) {
            (true, Some(user)) => user,
            _ => {
                tracing::debug!("Login rejected for {}: {:?}", email, reply.message);
                return Err(AppError::InvalidCredentials);
            }
        };

        tracing::info!("User {} logged in", user.id);
        let tokens = self.issue_token(&user)?;
        Ok(Session { tokens, user })
    }

    /// Create an account on the farm API
    pub async fn register(&self, input: RegisterInput) -> AppResult<Value> {
        let payload = RegisterPayload {
            nombre: input.name.trim(),
            correo: input.email.trim(),
            contrasena: &input.password,
            ubicacion: input.location.trim(),
            est_logico: 1,
        };
        let created = self.farm_api.register(&payload).await?;
        tracing::info!("Registered account for {}", payload.correo);
        Ok(created)
    }

    /// Sign a session token for a user
    pub fn issue_token(&self, user: &UserProfile) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }
}

/// Decode and validate a session token against a secret
pub fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })
}
