//! Application services for task lifecycle and retention.

mod lifecycle;
mod retention;
mod scheduler;

pub use lifecycle::{
    ArchivedTaskView, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use retention::{RetentionSweepService, SweepReport};
pub use scheduler::{
    DAILY_INTERVAL_SECS, RetentionScheduler, RetentionSchedulerHandle, SchedulerConfig,
};
