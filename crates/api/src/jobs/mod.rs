//! Background maintenance jobs.

mod chat_log_retention;
mod pool_metrics;
mod rate_limit_prune;
mod scheduler;
mod session_cleanup;

pub use chat_log_retention::ChatLogRetentionJob;
pub use pool_metrics::PoolMetricsJob;
pub use rate_limit_prune::RateLimitPruneJob;
pub use scheduler::{run_once, Job, JobError, JobFrequency, JobScheduler};
pub use session_cleanup::SessionCleanupJob;
