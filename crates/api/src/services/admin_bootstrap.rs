//! Seeds the first admin API key on startup.

use persistence::repositories::ApiKeyRepository;
use shared::crypto::{extract_key_prefix, is_well_formed_api_key, sha256_hex, API_KEY_PREFIX};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminBootstrapConfig;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Outcome of a bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AdminExists,
    Seeded,
}

/// Checks the configured key before touching the database.
fn checked_key(config: &AdminBootstrapConfig) -> Result<Option<&str>, BootstrapError> {
    let key = config.bootstrap_api_key.trim();
    if key.is_empty() {
        return Ok(None);
    }
    if !is_well_formed_api_key(key) {
        return Err(BootstrapError::Config(format!(
            "GYM__ADMIN__BOOTSTRAP_API_KEY must start with '{}' and carry at least 8 more characters",
            API_KEY_PREFIX
        )));
    }
    Ok(Some(key))
}

/// Stores `admin.bootstrap_api_key` as an admin key when no active admin key
/// exists. Idempotent.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    let Some(key) = checked_key(config)? else {
        return Ok(BootstrapOutcome::NotConfigured);
    };

    let repo = ApiKeyRepository::new(pool.clone());
    if repo.count_active_admin_keys().await? > 0 {
        info!("Admin API key already exists - skipping bootstrap");
        return Ok(BootstrapOutcome::AdminExists);
    }

    let key_prefix = extract_key_prefix(key)
        .ok_or_else(|| BootstrapError::Config("bootstrap key has no display prefix".to_string()))?;

    repo.create(&sha256_hex(key), key_prefix, "Bootstrap admin key", true)
        .await?;

    info!(api_key_prefix = %key_prefix, "Bootstrap admin API key created");
    warn!("SECURITY: remove GYM__ADMIN__BOOTSTRAP_API_KEY from configuration after initial setup");

    Ok(BootstrapOutcome::Seeded)
}
