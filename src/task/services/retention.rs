//! Retention sweep: archives long-finished tasks and purges old archives.

use crate::task::{domain::RetentionPolicy, ports::TaskRepository};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of one sweep run.
///
/// A failed phase contributes zero to its count and its message to `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Whether both phases completed.
    pub success: bool,
    /// Tasks archived by the archive phase.
    pub archived: usize,
    /// Tasks deleted by the purge phase.
    pub deleted: usize,
    /// Failure messages, joined with `"; "` when both phases fail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the two-phase retention sweep against a task repository.
#[derive(Clone)]
pub struct RetentionSweepService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: RetentionPolicy,
}

impl<R, C> RetentionSweepService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweep service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, policy: RetentionPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Returns the retention policy in force.
    #[must_use]
    pub const fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Runs a sweep at the clock's current time.
    pub async fn run_sweep(&self) -> SweepReport {
        self.run_sweep_at(self.clock.utc()).await
    }

    /// Runs a sweep as of `now`.
    ///
    /// Archives `done` tasks completed before the archive cutoff, then
    /// deletes archived tasks archived before the purge cutoff. A failing
    /// phase is logged and does not stop the other one. Cancelled tasks are
    /// never archived here.
    pub async fn run_sweep_at(&self, now: DateTime<Utc>) -> SweepReport {
        info!(%now, "starting task retention sweep");
        let mut failures = Vec::new();

        let archive_cutoff = self.policy.archive_cutoff(now);
        let archived = match self
            .repository
            .archive_completed_before(archive_cutoff, now)
            .await
        {
            Ok(count) => {
                info!(
                    count,
                    archive_after_days = self.policy.archive_after_days(),
                    "archived finished tasks"
                );
                count
            }
            Err(err) => {
                error!(error = %err, "archiving finished tasks failed");
                failures.push(format!("archive phase failed: {err}"));
                0
            }
        };

        let purge_cutoff = self.policy.purge_cutoff(now);
        let deleted = match self.repository.purge_archived_before(purge_cutoff).await {
            Ok(count) => {
                info!(
                    count,
                    purge_after_days = self.policy.purge_after_days(),
                    "deleted expired archived tasks"
                );
                count
            }
            Err(err) => {
                error!(error = %err, "deleting expired archived tasks failed");
                failures.push(format!("purge phase failed: {err}"));
                0
            }
        };

        let report = SweepReport {
            success: failures.is_empty(),
            archived,
            deleted,
            error: (!failures.is_empty()).then(|| failures.join("; ")),
        };
        if report.success {
            info!(archived, deleted, "task retention sweep completed");
        }
        report
    }
}
