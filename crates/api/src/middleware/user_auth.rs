//! Member JWT authentication.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::jwt::{extract_user_id, JwtConfig, JwtError};
use uuid::Uuid;

use crate::app::AppState;
use crate::config::JwtAuthConfig;
use crate::error::ApiError;

/// Authenticated member, from a validated access token.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user_id: Uuid,
    pub username: String,
    pub jti: String,
}

impl UserAuth {
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, JwtError> {
        let claims = jwt_config.validate_access_token(token)?;
        let user_id = extract_user_id(&claims)?;

        Ok(UserAuth {
            user_id,
            username: claims.username,
            jti: claims.jti,
        })
    }

    pub fn create_jwt_config(config: &JwtAuthConfig) -> Result<JwtConfig, JwtError> {
        JwtConfig::new(
            &config.secret,
            config.access_token_expiry_secs,
            config.leeway_secs,
        )
    }
}

/// The token from `Authorization: Bearer <token>`, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid bearer token.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        return ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
            .into_response();
    };

    match UserAuth::validate(&state.jwt, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
        }
    }
}

/// Attaches the member when a valid bearer token is sent. Invalid or missing
/// tokens are ignored.
pub async fn optional_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth = bearer_token(req.headers()).and_then(|token| {
        UserAuth::validate(&state.jwt, token)
            .map_err(|e| tracing::debug!("Ignoring invalid bearer token: {}", e))
            .ok()
    });

    if let Some(auth) = auth {
        req.extensions_mut().insert(auth);
    }

    next.run(req).await
}
