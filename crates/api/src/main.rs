use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use gym_api::config::Config;
use gym_api::jobs::{
    ChatLogRetentionJob, JobScheduler, PoolMetricsJob, RateLimitPruneJob, SessionCleanupJob,
};
use gym_api::middleware::{init_metrics, logging::init_logging};
use gym_api::services::{bootstrap_admin, BootstrapOutcome};
use gym_api::app::{self, AppState};

const JOB_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging);
    init_metrics()?;

    info!("Starting Boxing Academy API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    match bootstrap_admin(&pool, &config.admin).await? {
        BootstrapOutcome::Seeded => info!("Bootstrap admin API key stored"),
        BootstrapOutcome::AdminExists => {}
        BootstrapOutcome::NotConfigured => {
            warn!("No admin API key configured; admin endpoints unreachable until one is seeded")
        }
    }

    let mut scheduler = JobScheduler::new();
    scheduler.register(PoolMetricsJob::new(pool.clone()));
    scheduler.register(SessionCleanupJob::new(
        pool.clone(),
        config.session.idle_ttl_hours,
    ));
    if let Some(job) = ChatLogRetentionJob::new(pool.clone(), config.jobs.chat_log_retention_days)
    {
        scheduler.register(job);
    }

    let addr = config.socket_addr();
    let state = AppState::new(config, pool)?;
    if let Some(limiter) = state.rate_limiter.clone() {
        scheduler.register(RateLimitPruneJob::new(limiter));
    }
    scheduler.start();

    let app = app::create_router(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(JOB_SHUTDOWN_TIMEOUT).await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
