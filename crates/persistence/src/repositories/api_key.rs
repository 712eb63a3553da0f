//! Repository for admin API key database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::ApiKeyEntity;
use crate::metrics::QueryTimer;

/// Repository for API key operations.
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: PgPool,
}

impl ApiKeyRepository {
    /// Creates a new API key repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an API key by its hash.
    ///
    /// Returns `None` if no key with the given hash exists.
    pub async fn find_by_key_hash(
        &self,
        key_hash: &str,
    ) -> Result<Option<ApiKeyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_api_key_by_hash");
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            SELECT id, key_hash, key_prefix, name, is_active, is_admin,
                   last_used_at, created_at, expires_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Stores a new key. Only the hash and display prefix are kept.
    pub async fn create(
        &self,
        key_hash: &str,
        key_prefix: &str,
        name: &str,
        is_admin: bool,
    ) -> Result<ApiKeyEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_api_key");
        let result = sqlx::query_as::<_, ApiKeyEntity>(
            r#"
            INSERT INTO api_keys (key_hash, key_prefix, name, is_active, is_admin)
            VALUES ($1, $2, $3, true, $4)
            RETURNING id, key_hash, key_prefix, name, is_active, is_admin,
                      last_used_at, created_at, expires_at
            "#,
        )
        .bind(key_hash)
        .bind(key_prefix)
        .bind(name)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts admin keys that are active and unexpired.
    pub async fn count_active_admin_keys(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_active_admin_keys");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM api_keys
            WHERE is_admin AND is_active AND (expires_at IS NULL OR expires_at > NOW())
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Updates the last_used_at timestamp for an API key.
    ///
    /// This is typically called asynchronously after successful authentication.
    pub async fn update_last_used(&self, key_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE api_keys
            SET last_used_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(key_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Checks if an API key is valid for authentication.
    ///
    /// Returns `true` if the key is active and not expired.
    pub fn is_key_valid(key: &ApiKeyEntity) -> bool {
        Self::is_key_valid_at(key, Utc::now())
    }

    /// Checks if an API key is valid at a specific time.
    pub fn is_key_valid_at(key: &ApiKeyEntity, at: DateTime<Utc>) -> bool {
        if !key.is_active {
            return false;
        }

        match key.expires_at {
            Some(expires_at) => expires_at >= at,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_test_key(is_active: bool, expires_at: Option<DateTime<Utc>>) -> ApiKeyEntity {
        ApiKeyEntity {
            id: 1,
            key_hash: "test_hash".to_string(),
            key_prefix: "gym_aBcD".to_string(),
            name: "Front desk".to_string(),
            is_active,
            is_admin: true,
            last_used_at: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_is_key_valid_active_no_expiry() {
        let key = make_test_key(true, None);
        assert!(ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_active_future_expiry() {
        let key = make_test_key(true, Some(Utc::now() + Duration::days(30)));
        assert!(ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_past_expiry() {
        let key = make_test_key(true, Some(Utc::now() - Duration::days(1)));
        assert!(!ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_inactive() {
        let key = make_test_key(false, Some(Utc::now() + Duration::days(30)));
        assert!(!ApiKeyRepository::is_key_valid(&key));
    }

    #[test]
    fn test_is_key_valid_at_boundary() {
        let at = Utc::now();
        let key = make_test_key(true, Some(at));
        assert!(ApiKeyRepository::is_key_valid_at(&key, at));
        assert!(!ApiKeyRepository::is_key_valid_at(
            &key,
            at + Duration::seconds(1)
        ));
    }
}
