//! Samples database pool gauges.

use sqlx::PgPool;

use super::scheduler::{Job, JobError, JobFrequency};
use crate::middleware::metrics::record_connection_pool_metrics;

pub struct PoolMetricsJob {
    pool: PgPool,
}

impl PoolMetricsJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for PoolMetricsJob {
    fn name(&self) -> &'static str {
        "pool_metrics"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(15)
    }

    async fn execute(&self) -> Result<(), JobError> {
        record_connection_pool_metrics(
            self.pool.size(),
            self.pool.num_idle() as u32,
            self.pool.options().get_max_connections(),
        );
        Ok(())
    }
}
