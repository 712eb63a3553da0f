//! Member JWT extractors.
//!
//! Reuse the [`UserAuth`] inserted by the auth middleware when present,
//! otherwise validate the bearer token directly.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::error::ApiError;
pub use crate::middleware::user_auth::UserAuth;
use crate::middleware::user_auth::bearer_token;

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<UserAuth>() {
            return Ok(auth.clone());
        }

        let token = bearer_token(&parts.headers).ok_or_else(|| {
            ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

        UserAuth::validate(&state.jwt, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}

/// The member if a valid bearer token was sent.
#[derive(Debug, Clone)]
pub struct OptionalUserAuth(pub Option<UserAuth>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<UserAuth>() {
            return Ok(OptionalUserAuth(Some(auth.clone())));
        }

        let auth = bearer_token(&parts.headers)
            .and_then(|token| UserAuth::validate(&state.jwt, token).ok());
        Ok(OptionalUserAuth(auth))
    }
}
