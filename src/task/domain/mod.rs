//! Domain model for task lifecycle and retention.
//!
//! The task domain models status bookkeeping and the archive/purge windows
//! while keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod retention;
mod task;

pub use error::{
    ParseTaskCategoryError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use fields::{TaskCategory, TaskPriority, TaskStatus};
pub use ids::{TaskId, UserId};
pub use retention::{ARCHIVE_AFTER_DAYS, PURGE_AFTER_DAYS, RetentionPolicy};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskUpdate};
