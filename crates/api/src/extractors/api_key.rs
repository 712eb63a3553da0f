//! Admin API key authentication.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;

use crate::app::AppState;
use crate::error::ApiError;
use persistence::repositories::ApiKeyRepository;
use shared::crypto::{is_well_formed_api_key, sha256_hex};

/// Header carrying the admin API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// A validated API key.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    pub api_key_id: i64,
    /// Display prefix, e.g. `aBcDeFgH`.
    pub key_prefix: String,
    pub is_admin: bool,
}

impl ApiKeyAuth {
    /// Looks the key up by its SHA-256 hash and checks it is active and
    /// unexpired. `last_used_at` is updated in the background.
    pub async fn validate(pool: &PgPool, api_key: &str) -> Result<Self, ApiError> {
        if !is_well_formed_api_key(api_key) {
            return Err(ApiError::Unauthorized(
                "Invalid or missing API key".to_string(),
            ));
        }

        let repo = ApiKeyRepository::new(pool.clone());
        let key = repo
            .find_by_key_hash(&sha256_hex(api_key))
            .await
            .map_err(|e| {
                tracing::error!("Database error during API key lookup: {}", e);
                ApiError::Internal("Authentication service unavailable".to_string())
            })?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        if !ApiKeyRepository::is_key_valid(&key) {
            let message = if key.is_active {
                "API key has expired"
            } else {
                "Invalid or missing API key"
            };
            return Err(ApiError::Unauthorized(message.to_string()));
        }

        let pool = pool.clone();
        let key_id = key.id;
        tokio::spawn(async move {
            if let Err(e) = ApiKeyRepository::new(pool).update_last_used(key_id).await {
                tracing::warn!("Failed to update API key last_used_at: {}", e);
            }
        });

        Ok(ApiKeyAuth {
            api_key_id: key.id,
            key_prefix: key.key_prefix,
            is_admin: key.is_admin,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<ApiKeyAuth>() {
            return Ok(auth.clone());
        }

        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        Self::validate(&state.pool, api_key).await
    }
}
