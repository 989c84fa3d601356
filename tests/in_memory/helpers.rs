//! Shared test helpers for in-memory repository integration tests.

use crate::test_helpers::ManualClock;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rstest::fixture;
use scoutboard::{
    access::{Principal, Role},
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{RetentionPolicy, TaskDraft, UserId},
        services::{RetentionSweepService, TaskLifecycleService},
    },
};
use std::sync::Arc;

/// Instant every scenario starts from.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 10, 18, 30, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Builds a draft due two weeks after `t0`.
pub fn draft(title: &str) -> TaskDraft {
    let due = NaiveDate::from_ymd_opt(2025, 5, 24).expect("valid due date");
    TaskDraft::new(title, UserId::new(), due)
}

/// Lifecycle and sweep services sharing one repository and clock.
pub struct Troop {
    /// Lifecycle service under test.
    pub tasks: TaskLifecycleService<InMemoryTaskRepository, ManualClock>,
    /// Sweep service under test.
    pub sweep: RetentionSweepService<InMemoryTaskRepository, ManualClock>,
    /// Backing repository.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Shared clock.
    pub clock: Arc<ManualClock>,
    /// Acting leader.
    pub leader: Principal,
}

/// Provides fresh services for each test.
#[fixture]
pub fn troop() -> Troop {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(ManualClock::new(t0()));
    Troop {
        tasks: TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock)),
        sweep: RetentionSweepService::new(
            Arc::clone(&repository),
            Arc::clone(&clock),
            RetentionPolicy::default(),
        ),
        repository,
        clock,
        leader: Principal::new(UserId::new(), Role::Leader),
    }
}
