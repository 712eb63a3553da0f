//! Drops idle entries from the chatbot rate limiter.

use std::sync::Arc;

use tracing::debug;

use super::scheduler::{Job, JobError, JobFrequency};
use crate::middleware::RateLimiterState;

pub struct RateLimitPruneJob {
    limiter: Arc<RateLimiterState>,
}

impl RateLimitPruneJob {
    pub fn new(limiter: Arc<RateLimiterState>) -> Self {
        Self { limiter }
    }
}

#[async_trait::async_trait]
impl Job for RateLimitPruneJob {
    fn name(&self) -> &'static str {
        "rate_limit_prune"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(60)
    }

    async fn execute(&self) -> Result<(), JobError> {
        let removed = self.limiter.prune();
        if removed > 0 {
            debug!(
                removed,
                remaining = self.limiter.tracked_clients(),
                "Pruned idle rate limiter clients"
            );
        }
        Ok(())
    }
}
