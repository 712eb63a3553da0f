//! Removes visitor sessions (and their carts) after a period of inactivity.

use sqlx::PgPool;
use tracing::info;

use persistence::repositories::VisitorSessionRepository;

use super::scheduler::{Job, JobError, JobFrequency};

pub struct SessionCleanupJob {
    pool: PgPool,
    idle_ttl_hours: i64,
}

impl SessionCleanupJob {
    pub fn new(pool: PgPool, idle_ttl_hours: i64) -> Self {
        Self {
            pool,
            idle_ttl_hours,
        }
    }
}

#[async_trait::async_trait]
impl Job for SessionCleanupJob {
    fn name(&self) -> &'static str {
        "session_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> Result<(), JobError> {
        let deleted = VisitorSessionRepository::new(self.pool.clone())
            .delete_idle(self.idle_ttl_hours)
            .await?;

        if deleted > 0 {
            info!(
                deleted,
                idle_ttl_hours = self.idle_ttl_hours,
                "Removed idle visitor sessions"
            );
        }
        Ok(())
    }
}
