//! Runs the task retention sweep against a `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! retention_worker --database-url postgres://localhost/scoutboard [--once]
//! ```
//!
//! Without `--once` the worker sweeps immediately and then once per
//! interval until it receives Ctrl-C. Log verbosity follows `RUST_LOG`.

use std::sync::Arc;

use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use scoutboard::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{ARCHIVE_AFTER_DAYS, PURGE_AFTER_DAYS, RetentionPolicy},
    services::{DAILY_INTERVAL_SECS, RetentionScheduler, RetentionSweepService, SchedulerConfig},
};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line and environment settings for the worker.
#[derive(Debug, Parser)]
#[command(name = "retention_worker", about = "Archives and purges finished tasks")]
struct Args {
    /// `PostgreSQL` connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Days after completion before a done task is archived.
    #[arg(long, env = "ARCHIVE_AFTER_DAYS", default_value_t = ARCHIVE_AFTER_DAYS)]
    archive_after_days: u32,

    /// Days after archival before an archived task is deleted.
    #[arg(long, env = "PURGE_AFTER_DAYS", default_value_t = PURGE_AFTER_DAYS)]
    purge_after_days: u32,

    /// Seconds between sweeps.
    #[arg(long, env = "SWEEP_INTERVAL_SECS", default_value_t = DAILY_INTERVAL_SECS)]
    interval_secs: u64,

    /// Run a single sweep and exit.
    #[arg(long)]
    once: bool,

    /// Maximum pooled database connections.
    #[arg(
        long,
        env = "DATABASE_POOL_SIZE",
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pool_size: u32,
}

/// Errors that stop the worker.
#[derive(Debug, Error)]
enum WorkerError {
    #[error("failed to build database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("sweep finished with failures: {0}")]
    Sweep(String),
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[from] std::io::Error),
    #[error("scheduler task failed: {0}")]
    Scheduler(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), WorkerError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoutboard=info,retention_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let result = run(args).await;
    if let Err(ref err) = result {
        error!(error = %err, "retention worker exited with an error");
    }
    result
}

async fn run(args: Args) -> Result<(), WorkerError> {
    let manager = ConnectionManager::<PgConnection>::new(&args.database_url);
    let pool = Pool::builder().max_size(args.pool_size).build(manager)?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let policy = RetentionPolicy::new(args.archive_after_days, args.purge_after_days);
    let service = Arc::new(RetentionSweepService::new(
        repository,
        Arc::new(DefaultClock),
        policy,
    ));

    info!(
        archive_after_days = policy.archive_after_days(),
        purge_after_days = policy.purge_after_days(),
        once = args.once,
        "retention worker starting"
    );

    if args.once {
        let report = service.run_sweep().await;
        return match report.error {
            Some(message) if !report.success => Err(WorkerError::Sweep(message)),
            _ => Ok(()),
        };
    }

    let config = SchedulerConfig {
        interval_secs: args.interval_secs,
    };
    let handle = RetentionScheduler::new(service, config).spawn();
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    handle.shutdown().await?;
    Ok(())
}
