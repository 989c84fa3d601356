//! Recurring trigger for the retention sweep.

use super::retention::{RetentionSweepService, SweepReport};
use crate::task::ports::TaskRepository;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Seconds in one day, the default sweep period.
pub const DAILY_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Scheduling settings for the retention sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between sweep runs. Zero is treated as one second.
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: DAILY_INTERVAL_SECS,
        }
    }
}

impl SchedulerConfig {
    /// Returns the sweep period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Runs the retention sweep on a fixed period.
///
/// The first sweep fires as soon as the scheduler starts. A sweep that
/// overruns its period delays the next tick rather than bursting.
pub struct RetentionScheduler<R, C>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service: Arc<RetentionSweepService<R, C>>,
    config: SchedulerConfig,
}

impl<R, C> RetentionScheduler<R, C>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a scheduler for the given sweep service.
    #[must_use]
    pub const fn new(service: Arc<RetentionSweepService<R, C>>, config: SchedulerConfig) -> Self {
        Self { service, config }
    }

    /// Spawns the sweep loop onto the current Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> RetentionSchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (report_tx, report_rx) = watch::channel(None);
        let period = self.config.interval();
        let service = self.service;

        info!(?period, "starting retention sweep scheduler");
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = service.run_sweep().await;
                        if !report.success {
                            warn!(error = ?report.error, "retention sweep finished with failures");
                        }
                        report_tx.send_replace(Some(report));
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("retention sweep scheduler stopped");
                            break;
                        }
                    }
                }
            }
        });

        RetentionSchedulerHandle {
            shutdown: shutdown_tx,
            reports: report_rx,
            task,
        }
    }
}

/// Handle to a running [`RetentionScheduler`].
pub struct RetentionSchedulerHandle {
    shutdown: watch::Sender<bool>,
    reports: watch::Receiver<Option<SweepReport>>,
    task: JoinHandle<()>,
}

impl RetentionSchedulerHandle {
    /// Returns a receiver that observes the most recent sweep report.
    #[must_use]
    pub fn reports(&self) -> watch::Receiver<Option<SweepReport>> {
        self.reports.clone()
    }

    /// Stops the loop after any in-flight sweep and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] when the sweep task panicked or was
    /// aborted.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.shutdown.send_replace(true);
        self.task.await
    }
}
