//! Shared world state for task retention BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rstest::fixture;
use scoutboard::{
    access::{Principal, Role},
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{RetentionPolicy, TaskId, UserId},
        services::{RetentionSweepService, SweepReport, TaskLifecycleService},
    },
};

/// Lifecycle service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, ManualClock>;

/// Sweep service type used by the BDD world.
pub type TestSweepService = RetentionSweepService<InMemoryTaskRepository, ManualClock>;

/// Scenario world for retention behaviour tests.
pub struct RetentionWorld {
    pub tasks: TestTaskService,
    pub sweep: TestSweepService,
    pub clock: Arc<ManualClock>,
    pub leader: Principal,
    pub due_date: NaiveDate,
    pub task_id: Option<TaskId>,
    pub last_report: Option<SweepReport>,
}

impl RetentionWorld {
    /// Creates a world whose clock starts at the beginning of 2025.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 1, 1, 8, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let repository = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(ManualClock::new(start));

        Self {
            tasks: TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock)),
            sweep: RetentionSweepService::new(repository, Arc::clone(&clock), RetentionPolicy::default()),
            clock,
            leader: Principal::new(UserId::new(), Role::Leader),
            due_date: start.date_naive(),
            task_id: None,
            last_report: None,
        }
    }

    /// Returns the task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for RetentionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RetentionWorld {
    RetentionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
