//! Repository for page singletons stored as JSON documents.

use domain::models::content::PageSingleton;
use sqlx::PgPool;

use crate::entities::SitePageEntity;
use crate::metrics::QueryTimer;

use super::to_json_column;

/// Repository for the `site_pages` table.
///
/// Each singleton lives under its `PageSingleton::KEY`. A missing row reads
/// as the type's defaults and is written on first read.
#[derive(Clone)]
pub struct SitePageRepository {
    pool: PgPool,
}

impl SitePageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, key: &str) -> Result<Option<SitePageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_site_page");
        let result = sqlx::query_as::<_, SitePageEntity>(
            "SELECT key, content, updated_at FROM site_pages WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn upsert(
        &self,
        key: &str,
        content: &serde_json::Value,
    ) -> Result<SitePageEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_site_page");
        let result = sqlx::query_as::<_, SitePageEntity>(
            r#"
            INSERT INTO site_pages (key, content, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE
            SET content = EXCLUDED.content, updated_at = NOW()
            RETURNING key, content, updated_at
            "#,
        )
        .bind(key)
        .bind(content)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Loads a singleton, creating it with defaults when absent.
    ///
    /// Stored documents are merged over the defaults, so fields added after a
    /// row was written read as their default values.
    pub async fn load<P: PageSingleton>(&self) -> Result<P, sqlx::Error> {
        match self.find(P::KEY).await? {
            Some(row) => Ok(P::default()
                .merged_with(row.content)
                .unwrap_or_else(|e| {
                    tracing::warn!(
                        key = P::KEY,
                        error = %e,
                        "Stored page content unreadable, using defaults"
                    );
                    P::default()
                })),
            None => {
                let page = P::default();
                self.store(&page).await?;
                Ok(page)
            }
        }
    }

    /// Writes a singleton, replacing the stored document.
    pub async fn store<P: PageSingleton>(&self, page: &P) -> Result<(), sqlx::Error> {
        let content = to_json_column(page, P::KEY)?;
        self.upsert(P::KEY, &content).await?;
        Ok(())
    }
}
