//! Prunes the chatbot exchange log.

use sqlx::PgPool;
use tracing::info;

use persistence::repositories::ChatExchangeRepository;

use super::scheduler::{Job, JobError, JobFrequency};

pub struct ChatLogRetentionJob {
    pool: PgPool,
    retention_days: i64,
}

impl ChatLogRetentionJob {
    /// Returns `None` when `retention_days` is 0 or less, meaning keep forever.
    pub fn new(pool: PgPool, retention_days: i64) -> Option<Self> {
        (retention_days > 0).then_some(Self {
            pool,
            retention_days,
        })
    }
}

#[async_trait::async_trait]
impl Job for ChatLogRetentionJob {
    fn name(&self) -> &'static str {
        "chat_log_retention"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), JobError> {
        let deleted = ChatExchangeRepository::new(self.pool.clone())
            .delete_older_than(self.retention_days)
            .await?;

        info!(
            deleted,
            retention_days = self.retention_days,
            "Pruned chat exchange log"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap()
    }

    #[tokio::test]
    async fn test_zero_days_disables_job() {
        assert!(ChatLogRetentionJob::new(lazy_pool(), 0).is_none());
    }

    #[tokio::test]
    async fn test_positive_days_schedule_daily() {
        let job = ChatLogRetentionJob::new(lazy_pool(), 90).unwrap();
        assert_eq!(job.frequency(), JobFrequency::Daily);
        assert_eq!(job.name(), "chat_log_retention");
    }
}
